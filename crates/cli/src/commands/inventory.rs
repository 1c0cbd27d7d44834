//! Inventory command - hash a software inventory

use anyhow::{Context, Result, bail};
use hwsig_adapters::file::FsInventorySource;
use hwsig_domain::{InventorySource, hash_inventory};
use std::path::PathBuf;

use crate::args::InventoryArgs;
use crate::commands::compute::build_inventory_source;
use crate::config::AppConfig;

pub async fn execute(args: InventoryArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let source: Box<dyn InventorySource> = match args.file {
        Some(path) => Box::new(FsInventorySource::new(path)),
        None => match build_inventory_source(&config)? {
            Some(source) => source,
            None => bail!("Inventory source is 'none'; pass --file or configure inventory.source"),
        },
    };

    let entries = source
        .entries()
        .await
        .with_context(|| format!("Failed to read inventory from {} source", source.name()))?;
    let hash = hash_inventory(&entries);

    tracing::info!(source = source.name(), entries = entries.len(), "Hashed inventory");

    if args.json {
        let output = serde_json::json!({
            "source": source.name(),
            "entries": entries.len(),
            "inventory_hash": hash,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", hash);
    }

    Ok(())
}
