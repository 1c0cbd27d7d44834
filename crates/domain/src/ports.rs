//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundary between the signature core and the
//! operating system. Adapters implement them to read real machine data.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{InventoryEntry, RawAttributes};

/// Error type for collector operations
///
/// Collectors report per-attribute failures as sentinel values; these errors
/// are for a source that cannot be used at all.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error in {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// Port for collecting raw machine attributes
#[async_trait]
pub trait AttributeCollector: Send + Sync {
    /// Collect all attributes this source knows about
    async fn collect(&self) -> Result<RawAttributes, CollectError>;

    /// Short name for logs and reports (e.g., "system", "file")
    fn name(&self) -> &'static str;
}

/// Port for listing installed software
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// List installed programs, in whatever order the source yields them
    async fn entries(&self) -> Result<Vec<InventoryEntry>, CollectError>;

    fn name(&self) -> &'static str;
}

#[async_trait]
impl<T: AttributeCollector + ?Sized> AttributeCollector for Box<T> {
    async fn collect(&self) -> Result<RawAttributes, CollectError> {
        (**self).collect().await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[async_trait]
impl<T: InventorySource + ?Sized> InventorySource for Box<T> {
    async fn entries(&self) -> Result<Vec<InventoryEntry>, CollectError> {
        (**self).entries().await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
