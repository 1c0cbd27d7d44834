//! File-based software inventory source

use async_trait::async_trait;
use hwsig_domain::{CollectError, InventoryEntry, InventorySource};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::attributes_fs::FileFormat;

/// TOML layout: a list of `[[entries]]` tables
#[derive(Deserialize)]
struct InventoryFile {
    #[serde(default)]
    entries: Vec<InventoryEntry>,
}

/// Reads an inventory list from a `.json` array or a `.toml` file
pub struct FsInventorySource {
    path: PathBuf,
}

impl FsInventorySource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl InventorySource for FsInventorySource {
    async fn entries(&self) -> Result<Vec<InventoryEntry>, CollectError> {
        let format = FileFormat::from_path(&self.path)?;
        let content = std::fs::read_to_string(&self.path)?;

        let parse_error = |message: String| CollectError::Parse {
            source_name: self.path.display().to_string(),
            message,
        };

        let entries = match format {
            FileFormat::Json => serde_json::from_str::<Vec<InventoryEntry>>(&content)
                .map_err(|e| parse_error(e.to_string()))?,
            FileFormat::Toml => {
                toml::from_str::<InventoryFile>(&content)
                    .map_err(|e| parse_error(e.to_string()))?
                    .entries
            }
        };

        tracing::debug!(
            path = %self.path.display(),
            entries = entries.len(),
            "Loaded inventory from file"
        );

        Ok(entries)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
