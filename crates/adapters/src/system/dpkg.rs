//! Installed-package inventory from the dpkg status database

use async_trait::async_trait;
use hwsig_domain::{CollectError, InventoryEntry, InventorySource};
use std::path::{Path, PathBuf};

pub const DEFAULT_STATUS_PATH: &str = "/var/lib/dpkg/status";

/// Lists installed packages from a dpkg `status` file
pub struct DpkgInventorySource {
    status_path: PathBuf,
}

impl DpkgInventorySource {
    pub fn new(status_path: impl AsRef<Path>) -> Self {
        Self {
            status_path: status_path.as_ref().to_path_buf(),
        }
    }

    pub fn status_path(&self) -> &Path {
        &self.status_path
    }
}

impl Default for DpkgInventorySource {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_PATH)
    }
}

#[async_trait]
impl InventorySource for DpkgInventorySource {
    async fn entries(&self) -> Result<Vec<InventoryEntry>, CollectError> {
        let content = std::fs::read_to_string(&self.status_path)?;
        let entries = parse_status(&content);

        tracing::debug!(
            path = %self.status_path.display(),
            packages = entries.len(),
            "Parsed dpkg status"
        );

        Ok(entries)
    }

    fn name(&self) -> &'static str {
        "dpkg"
    }
}

/// One entry per installed stanza; stanzas without a package name are skipped
fn parse_status(content: &str) -> Vec<InventoryEntry> {
    content
        .split("\n\n")
        .filter_map(|stanza| {
            let mut name = None;
            let mut version = String::new();
            let mut installed = true;

            for line in stanza.lines() {
                if let Some(value) = line.strip_prefix("Package:") {
                    name = Some(value.trim().to_string());
                } else if let Some(value) = line.strip_prefix("Version:") {
                    version = value.trim().to_string();
                } else if let Some(value) = line.strip_prefix("Status:") {
                    installed = value.trim().ends_with(" installed");
                }
            }

            let name = name.filter(|n| !n.is_empty())?;
            installed.then(|| InventoryEntry::new(name, version))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const STATUS: &str = "Package: bash\nStatus: install ok installed\nVersion: 5.2.21-2\n\
                          Description: GNU Bourne Again SHell\n multi-line text\n\n\
                          Package: old-tool\nStatus: deinstall ok config-files\nVersion: 1.0\n\n\
                          Package: zlib1g\nStatus: install ok installed\nVersion: 1:1.3\n\n\
                          Status: install ok installed\nVersion: 9.9\n";

    #[test]
    fn test_parse_status_keeps_installed_named_packages() {
        let entries = parse_status(STATUS);
        assert_eq!(
            entries,
            vec![
                InventoryEntry::new("bash", "5.2.21-2"),
                InventoryEntry::new("zlib1g", "1:1.3"),
            ]
        );
    }

    #[test]
    fn test_stanza_without_status_counts_as_installed() {
        let entries = parse_status("Package: tool\nVersion: 2\n");
        assert_eq!(entries, vec![InventoryEntry::new("tool", "2")]);
    }

    #[tokio::test]
    async fn test_entries_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("status");
        std::fs::write(&path, STATUS).unwrap();

        let entries = DpkgInventorySource::new(&path).entries().await.unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_status_file() {
        let result = DpkgInventorySource::new("/nonexistent/status").entries().await;
        assert!(matches!(result, Err(CollectError::Io(_))));
    }
}
