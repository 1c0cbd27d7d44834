//! Domain models and value objects

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the seven machine attributes that feed the signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    CpuId,
    FirmwareHash,
    MacOriginal,
    OsVersion,
    PublicKeyFingerprint,
    SerialNumber,
    SoftwareInventoryHash,
}

impl Attribute {
    /// All known attributes
    pub const ALL: [Attribute; 7] = [
        Attribute::CpuId,
        Attribute::SerialNumber,
        Attribute::MacOriginal,
        Attribute::FirmwareHash,
        Attribute::OsVersion,
        Attribute::PublicKeyFingerprint,
        Attribute::SoftwareInventoryHash,
    ];

    /// Key used in raw maps and in the canonical string
    pub const fn as_str(self) -> &'static str {
        match self {
            Attribute::CpuId => "cpu_id",
            Attribute::SerialNumber => "serial_number",
            Attribute::MacOriginal => "mac_original",
            Attribute::FirmwareHash => "firmware_hash",
            Attribute::OsVersion => "os_version",
            Attribute::PublicKeyFingerprint => "public_key_fingerprint",
            Attribute::SoftwareInventoryHash => "software_inventory_hash",
        }
    }

    /// Look up an attribute by key, ignoring case
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.as_str().eq_ignore_ascii_case(key))
    }

    /// Placeholder a collector reports when the value cannot be obtained
    pub const fn sentinel(self) -> &'static str {
        match self {
            Attribute::CpuId => "CPU_ID_NOT_FOUND",
            Attribute::SerialNumber => "SERIAL_NUMBER_NOT_FOUND",
            Attribute::MacOriginal => "MAC_UNKNOWN",
            Attribute::FirmwareHash => "FIRMWARE_HASH_NOT_COMPUTED",
            Attribute::OsVersion => "OS_NOT_DETECTED",
            Attribute::PublicKeyFingerprint => "PUBLIC_KEY_NOT_FOUND",
            Attribute::SoftwareInventoryHash => "SOFTWARE_HASH_NOT_COMPUTED",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute values exactly as a collector reported them.
///
/// Keys are lower-cased on insertion and a later key replaces an earlier one
/// that differs only in case. Keys that do not name a known attribute are
/// kept but never reach the signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "BTreeMap<String, String>")]
pub struct RawAttributes {
    values: BTreeMap<String, String>,
}

impl RawAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value under a (case-insensitive) key
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        let key = key.as_ref();
        let key = match Attribute::from_key(key) {
            Some(attr) => attr.as_str().to_string(),
            None => key.to_lowercase(),
        };
        self.values.insert(key, value.into());
    }

    /// Set a known attribute
    pub fn set(&mut self, attr: Attribute, value: impl Into<String>) {
        self.values.insert(attr.as_str().to_string(), value.into());
    }

    /// Builder-style variant of [`RawAttributes::set`]
    pub fn with(mut self, attr: Attribute, value: impl Into<String>) -> Self {
        self.set(attr, value);
        self
    }

    /// Value of a known attribute, if the collector supplied one
    pub fn get(&self, attr: Attribute) -> Option<&str> {
        self.values.get(attr.as_str()).map(String::as_str)
    }

    /// All stored entries, unknown keys included, in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawAttributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut raw = RawAttributes::new();
        for (key, value) in iter {
            raw.insert(key, value);
        }
        raw
    }
}

// Entries are inserted in document order so the last of several
// case-colliding keys wins on every parse.
impl<'de> Deserialize<'de> for RawAttributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawVisitor;

        impl<'de> Visitor<'de> for RawVisitor {
            type Value = RawAttributes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut raw = RawAttributes::new();
                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    raw.insert(key, value);
                }
                Ok(raw)
            }
        }

        deserializer.deserialize_map(RawVisitor)
    }
}

impl From<RawAttributes> for BTreeMap<String, String> {
    fn from(raw: RawAttributes) -> Self {
        raw.values
    }
}

/// Attribute values after per-field cleanup; always holds all seven keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedAttributes {
    values: BTreeMap<Attribute, String>,
}

impl NormalizedAttributes {
    /// Build from per-attribute values; attributes not yielded become empty
    pub fn from_values(values: impl IntoIterator<Item = (Attribute, String)>) -> Self {
        let mut map: BTreeMap<Attribute, String> = Attribute::ALL
            .into_iter()
            .map(|attr| (attr, String::new()))
            .collect();
        map.extend(values);
        Self { values: map }
    }

    pub fn get(&self, attr: Attribute) -> &str {
        self.values.get(&attr).map(String::as_str).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// View the normalized values as a raw map (for re-normalization)
    pub fn to_raw(&self) -> RawAttributes {
        self.iter()
            .map(|(attr, value)| (attr.as_str(), value.to_string()))
            .collect()
    }
}

/// Deterministic serialization of the normalized attributes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalString(String);

impl CanonicalString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hardware Identity Signature: 64 uppercase hex characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HardwareSignature(String);

impl HardwareSignature {
    pub const HEX_LEN: usize = 64;

    pub(crate) fn from_digest_hex(hex: String) -> Self {
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HardwareSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An installed program as reported by an inventory collector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Version", default)]
    pub version: String,
}

impl InventoryEntry {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for InventoryEntry {
    fn from((name, version): (N, V)) -> Self {
        Self::new(name, version)
    }
}

/// Every intermediate stage of one signature computation, for auditing
#[derive(Debug, Clone, Serialize)]
pub struct SignatureReport {
    pub normalized: NormalizedAttributes,
    pub canonical: CanonicalString,
    pub signature: HardwareSignature,
}

/// Before/after view of one attribute in a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeChange {
    pub attribute: Attribute,
    pub base: String,
    pub candidate: String,
}

/// Result of comparing two raw attribute sets
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub base_signature: HardwareSignature,
    pub candidate_signature: HardwareSignature,
    /// Attributes whose normalized value differs, in canonical key order
    pub changes: Vec<AttributeChange>,
}

impl ComparisonReport {
    pub fn signature_changed(&self) -> bool {
        self.base_signature != self.candidate_signature
    }
}
