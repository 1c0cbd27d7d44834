//! Signature computation use case

use thiserror::Error;

use crate::{
    inventory::hash_inventory,
    model::{Attribute, RawAttributes, SignatureReport},
    ports::{AttributeCollector, CollectError, InventorySource},
    signature::derive_signature,
};

/// Errors from the compute use case
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Attribute collection failed: {0}")]
    Collect(#[from] CollectError),
}

/// Raw input actually used plus every derived stage
#[derive(Debug, Clone)]
pub struct ComputeOutcome {
    pub raw: RawAttributes,
    pub report: SignatureReport,
}

/// Use case: collect attributes, fold in the inventory hash, derive the HIS
pub struct ComputeSignatureUseCase<C, I> {
    collector: C,
    inventory: Option<I>,
}

impl<C: AttributeCollector, I: InventorySource> ComputeSignatureUseCase<C, I> {
    /// `inventory: None` keeps whatever `software_inventory_hash` the collector reported
    pub fn new(collector: C, inventory: Option<I>) -> Self {
        Self {
            collector,
            inventory,
        }
    }

    pub async fn execute(&self) -> Result<ComputeOutcome, ComputeError> {
        tracing::info!(collector = self.collector.name(), "Collecting attributes");
        let mut raw = self.collector.collect().await?;

        if let Some(source) = &self.inventory {
            let value = match source.entries().await {
                Ok(entries) => {
                    tracing::info!(
                        source = source.name(),
                        entries = entries.len(),
                        "Collected software inventory"
                    );
                    hash_inventory(&entries)
                }
                Err(e) => {
                    tracing::warn!(
                        source = source.name(),
                        error = %e,
                        "Software inventory unavailable, using sentinel"
                    );
                    Attribute::SoftwareInventoryHash.sentinel().to_string()
                }
            };
            raw.set(Attribute::SoftwareInventoryHash, value);
        }

        for attr in Attribute::ALL {
            if raw.get(attr).is_none() {
                tracing::debug!(attribute = %attr, "Attribute missing, normalizes to empty");
            }
        }

        let report = derive_signature(&raw);

        tracing::debug!(canonical = %report.canonical, "Canonical string");
        tracing::info!(signature = %report.signature, "Computed hardware signature");

        Ok(ComputeOutcome { raw, report })
    }
}
