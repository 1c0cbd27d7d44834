//! Case policy table
//!
//! Declares, per attribute, whether letter case carries meaning. The table is
//! compile-time data; there is no way to change it at runtime.

use serde::Serialize;

use crate::model::Attribute;

/// Whether letter case is significant for an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CasePolicy {
    /// Case is preserved; `abc` and `ABC` are different readings
    Sensitive,
    /// Case is folded to upper; `abc` and `ABC` are the same reading
    Insensitive,
}

/// The full policy table, in declaration order
pub const POLICY_TABLE: [(Attribute, CasePolicy); 7] = [
    (Attribute::CpuId, policy_for(Attribute::CpuId)),
    (Attribute::SerialNumber, policy_for(Attribute::SerialNumber)),
    (Attribute::OsVersion, policy_for(Attribute::OsVersion)),
    (Attribute::MacOriginal, policy_for(Attribute::MacOriginal)),
    (Attribute::FirmwareHash, policy_for(Attribute::FirmwareHash)),
    (
        Attribute::PublicKeyFingerprint,
        policy_for(Attribute::PublicKeyFingerprint),
    ),
    (
        Attribute::SoftwareInventoryHash,
        policy_for(Attribute::SoftwareInventoryHash),
    ),
];

/// Case policy of a single attribute
pub const fn policy_for(attr: Attribute) -> CasePolicy {
    match attr {
        Attribute::CpuId | Attribute::SerialNumber | Attribute::OsVersion => CasePolicy::Sensitive,
        // The inventory hash is insensitive as a hex string even though the
        // entries it was built from were hashed case-sensitively.
        Attribute::MacOriginal
        | Attribute::FirmwareHash
        | Attribute::PublicKeyFingerprint
        | Attribute::SoftwareInventoryHash => CasePolicy::Insensitive,
    }
}
