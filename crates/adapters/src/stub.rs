//! Stub collectors for testing and offline mode

use async_trait::async_trait;
use hwsig_domain::{
    Attribute, AttributeCollector, CollectError, InventoryEntry, InventorySource, RawAttributes,
};

/// Collector that returns a fixed attribute set
pub struct StubAttributeCollector {
    raw: RawAttributes,
}

impl StubAttributeCollector {
    /// A fixed reference machine
    pub fn reference() -> Self {
        Self::with_attributes(
            RawAttributes::new()
                .with(Attribute::CpuId, "BFEBFBFF000806C1")
                .with(Attribute::SerialNumber, "NXA0MEB00A1160D9C73400")
                .with(Attribute::MacOriginal, "0A:00:27:00:00:0E")
                .with(
                    Attribute::FirmwareHash,
                    "663c81b7cfed5112d0fc382ab439ad1a62ecbd64db6518f6f8ae6f79591d34d6",
                )
                .with(Attribute::OsVersion, "Windows-11-10.0.26200-SP0")
                .with(
                    Attribute::PublicKeyFingerprint,
                    "286d3173f934d9b531ca05f6fe900044e57694bb00a719020f6d5d6bd623bd9a",
                )
                .with(
                    Attribute::SoftwareInventoryHash,
                    Attribute::SoftwareInventoryHash.sentinel(),
                ),
        )
    }

    pub fn with_attributes(raw: RawAttributes) -> Self {
        Self { raw }
    }
}

impl Default for StubAttributeCollector {
    fn default() -> Self {
        Self::reference()
    }
}

#[async_trait]
impl AttributeCollector for StubAttributeCollector {
    async fn collect(&self) -> Result<RawAttributes, CollectError> {
        Ok(self.raw.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Inventory source that returns a fixed list
pub struct StubInventorySource {
    entries: Vec<InventoryEntry>,
}

impl StubInventorySource {
    /// The reference machine's two programs
    pub fn reference() -> Self {
        Self::with_entries(vec![
            InventoryEntry::new("app", "1.0"),
            InventoryEntry::new("prueba", "2.3"),
        ])
    }

    pub fn with_entries(entries: Vec<InventoryEntry>) -> Self {
        Self { entries }
    }
}

impl Default for StubInventorySource {
    fn default() -> Self {
        Self::reference()
    }
}

#[async_trait]
impl InventorySource for StubInventorySource {
    async fn entries(&self) -> Result<Vec<InventoryEntry>, CollectError> {
        Ok(self.entries.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
