//! Policy command - show the case policy table

use anyhow::Result;
use hwsig_domain::{CasePolicy, POLICY_TABLE};

use crate::args::PolicyArgs;

pub fn execute(args: PolicyArgs) -> Result<()> {
    if args.json {
        let mut output = serde_json::Map::new();
        for (attr, policy) in POLICY_TABLE {
            output.insert(attr.to_string(), serde_json::to_value(policy)?);
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Case Policy");
    println!("===========");
    for (attr, policy) in POLICY_TABLE {
        let label = match policy {
            CasePolicy::Sensitive => "sensitive",
            CasePolicy::Insensitive => "insensitive",
        };
        println!("  {:<24} {}", attr.as_str(), label);
    }

    Ok(())
}
