//! File-based attribute collector

use async_trait::async_trait;
use hwsig_domain::{AttributeCollector, CollectError, RawAttributes};
use std::path::{Path, PathBuf};

/// Serialized form of an attributes or inventory file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub(crate) fn from_path(path: &Path) -> Result<Self, CollectError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => Err(CollectError::Parse {
                source_name: path.display().to_string(),
                message: "Unsupported file extension (expected .json or .toml)".to_string(),
            }),
        }
    }
}

/// Reads a previously captured raw attribute map from disk
pub struct FsAttributeCollector {
    path: PathBuf,
}

impl FsAttributeCollector {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn parse(&self, content: &str) -> Result<RawAttributes, CollectError> {
        let parse_error = |message: String| CollectError::Parse {
            source_name: self.path.display().to_string(),
            message,
        };

        match FileFormat::from_path(&self.path)? {
            FileFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
            FileFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
        }
    }
}

#[async_trait]
impl AttributeCollector for FsAttributeCollector {
    async fn collect(&self) -> Result<RawAttributes, CollectError> {
        let content = std::fs::read_to_string(&self.path)?;
        let raw = self.parse(&content)?;

        tracing::debug!(
            path = %self.path.display(),
            keys = raw.len(),
            "Loaded raw attributes from file"
        );

        Ok(raw)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwsig_domain::{Attribute, derive_signature};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_json_attributes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("machine.json");
        std::fs::write(
            &path,
            r#"{"CPU_ID": "abc123", "mac_original": "aa:bb", "unrelated": "x"}"#,
        )
        .unwrap();

        let raw = FsAttributeCollector::new(&path).collect().await.unwrap();

        assert_eq!(raw.get(Attribute::CpuId), Some("abc123"));
        assert_eq!(raw.get(Attribute::MacOriginal), Some("aa:bb"));
        assert_eq!(raw.get(Attribute::SerialNumber), None);
    }

    #[tokio::test]
    async fn test_load_toml_attributes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("machine.toml");
        std::fs::write(
            &path,
            "cpu_id = \"abc123\"\nos_version = \"Windows-11-10.0.26200-SP0\"\n",
        )
        .unwrap();

        let raw = FsAttributeCollector::new(&path).collect().await.unwrap();

        assert_eq!(raw.get(Attribute::OsVersion), Some("Windows-11-10.0.26200-SP0"));
    }

    #[tokio::test]
    async fn test_case_colliding_keys_give_stable_signature() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("machine.json");
        std::fs::write(
            &path,
            r#"{"CPU_ID": "first", "cpu_id": "second", "Serial_Number": "x", "SERIAL_NUMBER": "y"}"#,
        )
        .unwrap();

        let collector = FsAttributeCollector::new(&path);
        let first = collector.collect().await.unwrap();
        assert_eq!(first.get(Attribute::CpuId), Some("second"));
        assert_eq!(first.get(Attribute::SerialNumber), Some("y"));

        let expected = derive_signature(&first).signature;
        for _ in 0..50 {
            let raw = collector.collect().await.unwrap();
            assert_eq!(derive_signature(&raw).signature, expected);
        }
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("machine.yaml");
        std::fs::write(&path, "cpu_id: abc").unwrap();

        let result = FsAttributeCollector::new(&path).collect().await;
        assert!(matches!(result, Err(CollectError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("machine.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = FsAttributeCollector::new(&path).collect().await;
        assert!(matches!(result, Err(CollectError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = FsAttributeCollector::new("/nonexistent/machine.json")
            .collect()
            .await;
        assert!(matches!(result, Err(CollectError::Io(_))));
    }
}
