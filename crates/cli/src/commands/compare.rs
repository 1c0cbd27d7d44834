//! Compare command - report which attributes changed between two readings

use anyhow::{Context, Result};
use hwsig_adapters::file::FsAttributeCollector;
use hwsig_domain::AttributeCollector;
use hwsig_domain::usecases::compare;

use crate::args::CompareArgs;

pub async fn execute(args: CompareArgs) -> Result<()> {
    let base = FsAttributeCollector::new(&args.base)
        .collect()
        .await
        .with_context(|| format!("Failed to load base attributes: {}", args.base.display()))?;
    let candidate = FsAttributeCollector::new(&args.candidate)
        .collect()
        .await
        .with_context(|| {
            format!(
                "Failed to load candidate attributes: {}",
                args.candidate.display()
            )
        })?;

    let report = compare(&base, &candidate);

    if args.json {
        let output = serde_json::json!({
            "base_signature": report.base_signature,
            "candidate_signature": report.candidate_signature,
            "signature_changed": report.signature_changed(),
            "changes": report.changes,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Comparison");
    println!("==========");
    println!();
    println!("Base HIS:      {}", report.base_signature);
    println!("Candidate HIS: {}", report.candidate_signature);
    println!();

    if report.changes.is_empty() {
        println!("No normalized attribute changed.");
    } else {
        println!("Changed attributes:");
        for change in &report.changes {
            println!("  - {}", change.attribute);
            println!("      base:      {}", change.base);
            println!("      candidate: {}", change.candidate);
        }
    }

    println!();
    let verdict = if report.signature_changed() {
        "changed"
    } else {
        "unchanged"
    };
    println!("Signature {}", verdict);

    Ok(())
}
