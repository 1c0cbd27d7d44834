//! Compute command - collect attributes and derive the signature

use anyhow::{Context, Result, bail};
use hwsig_adapters::{
    file::{FsAttributeCollector, FsInventorySource},
    stubs::{StubAttributeCollector, StubInventorySource},
    system::{DpkgInventorySource, SystemAttributeCollector},
};
use hwsig_domain::usecases::{ComputeOutcome, ComputeSignatureUseCase};
use hwsig_domain::{AttributeCollector, InventorySource};
use std::path::PathBuf;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::args::ComputeArgs;
use crate::config::AppConfig;

pub async fn execute(args: ComputeArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let collector = build_collector(&config, &args)?;
    let collector_name = collector.name();
    let inventory = if args.no_inventory {
        None
    } else {
        match &args.inventory {
            Some(path) => Some(Box::new(FsInventorySource::new(path)) as Box<dyn InventorySource>),
            None => build_inventory_source(&config)?,
        }
    };

    let usecase = ComputeSignatureUseCase::new(collector, inventory);
    let outcome = usecase
        .execute()
        .await
        .context("Signature computation failed")?;

    if args.json {
        let computed_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("Failed to format timestamp")?;
        let output = serde_json::json!({
            "signature": outcome.report.signature,
            "canonical": outcome.report.canonical,
            "normalized": outcome.report.normalized,
            "raw": outcome.raw,
            "collector": collector_name,
            "computed_at": computed_at,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if args.show_steps {
        print_steps(&outcome);
    } else {
        println!("{}", outcome.report.signature);
    }

    Ok(())
}

pub(crate) fn build_collector(
    config: &AppConfig,
    args: &ComputeArgs,
) -> Result<Box<dyn AttributeCollector>> {
    if let Some(path) = &args.attributes {
        return Ok(Box::new(FsAttributeCollector::new(path)));
    }

    let kind = args.collector.as_deref().unwrap_or(&config.collector.kind);
    match kind {
        "system" => Ok(Box::new(SystemAttributeCollector::new(
            config.system.to_paths(),
        ))),
        "file" => {
            let Some(path) = &config.collector.attributes_file else {
                bail!("Collector 'file' requires --attributes or collector.attributes_file");
            };
            Ok(Box::new(FsAttributeCollector::new(path)))
        }
        "stub" => Ok(Box::new(StubAttributeCollector::reference())),
        other => bail!("Unknown collector: {}", other),
    }
}

pub(crate) fn build_inventory_source(
    config: &AppConfig,
) -> Result<Option<Box<dyn InventorySource>>> {
    match config.inventory.source.as_str() {
        "system" => Ok(Some(Box::new(DpkgInventorySource::new(
            &config.inventory.dpkg_status_path,
        )))),
        "file" => {
            let Some(path) = &config.inventory.file else {
                bail!("Inventory source 'file' requires inventory.file");
            };
            Ok(Some(Box::new(FsInventorySource::new(path))))
        }
        "stub" => Ok(Some(Box::new(StubInventorySource::reference()))),
        "none" => Ok(None),
        other => bail!("Unknown inventory source: {}", other),
    }
}

fn print_steps(outcome: &ComputeOutcome) {
    println!("Raw attributes");
    println!("==============");
    for (key, value) in outcome.raw.iter() {
        println!("  {}: {}", key, value);
    }
    println!();

    println!("Normalized attributes");
    println!("=====================");
    for (attr, value) in outcome.report.normalized.iter() {
        println!("  {}: {}", attr, value);
    }
    println!();

    println!("Canonical string");
    println!("================");
    println!("{}", outcome.report.canonical);
    println!();

    println!("HIS: {}", outcome.report.signature);
}
