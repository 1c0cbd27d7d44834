//! hwsig adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `system`: Linux procfs/sysfs attribute collector and dpkg inventory
//! - `file`: Attribute maps and inventory lists captured to JSON/TOML files
//! - `stub`: Fixed reference machine for tests and offline runs

mod attributes_fs;
mod inventory_fs;
mod stub;

pub mod system;

/// Re-exports for file-based adapters
pub mod file {
    pub use crate::attributes_fs::FsAttributeCollector;
    pub use crate::inventory_fs::FsInventorySource;
}

/// Re-exports for stub adapters
pub mod stubs {
    pub use crate::stub::{StubAttributeCollector, StubInventorySource};
}
