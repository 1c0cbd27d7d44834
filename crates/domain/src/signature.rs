//! Hardware Identity Signature computation

use sha2::{Digest, Sha256};

use crate::canonical::canonicalize;
use crate::model::{CanonicalString, HardwareSignature, RawAttributes, SignatureReport};
use crate::normalize::normalize;

/// SHA-256 of the canonical string, rendered as uppercase hex
pub fn compute_signature(canonical: &CanonicalString) -> HardwareSignature {
    let digest = Sha256::digest(canonical.as_str().as_bytes());
    HardwareSignature::from_digest_hex(format!("{:X}", digest))
}

/// Run normalization, canonicalization and hashing over a raw map
pub fn derive_signature(raw: &RawAttributes) -> SignatureReport {
    let normalized = normalize(raw);
    let canonical = canonicalize(&normalized);
    let signature = compute_signature(&canonical);

    SignatureReport {
        normalized,
        canonical,
        signature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::hash_inventory;
    use crate::model::{Attribute, InventoryEntry};

    fn base_raw() -> RawAttributes {
        RawAttributes::new()
            .with(Attribute::CpuId, "abc123")
            .with(Attribute::SerialNumber, "n123j45")
            .with(Attribute::OsVersion, "Windows-11-10.0.26200")
            .with(Attribute::MacOriginal, "aa:bb:cc")
            .with(Attribute::FirmwareHash, "aa")
            .with(Attribute::PublicKeyFingerprint, "bb")
            .with(Attribute::SoftwareInventoryHash, "cc")
    }

    fn his(raw: &RawAttributes) -> HardwareSignature {
        derive_signature(raw).signature
    }

    fn reference_machine() -> RawAttributes {
        let inventory = hash_inventory(&[
            InventoryEntry::new("app", "1.0"),
            InventoryEntry::new("prueba", "2.3"),
        ]);
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
            .with(Attribute::SoftwareInventoryHash, inventory)
    }

    #[test]
    fn test_empty_canonical_string_digest() {
        let sig = compute_signature(&CanonicalString::new(""));
        assert_eq!(
            sig.as_str(),
            "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855"
        );
    }

    #[test]
    fn test_signature_is_uppercase_hex() {
        let sig = his(&base_raw());
        assert_eq!(sig.as_str().len(), HardwareSignature::HEX_LEN);
        assert!(
            sig.as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        );
    }

    #[test]
    fn test_all_empty_map_is_well_defined() {
        let report = derive_signature(&RawAttributes::new());
        assert_eq!(report.signature.as_str().len(), 64);
        assert_eq!(report.signature, compute_signature(&report.canonical));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(his(&base_raw()), his(&base_raw()));
    }

    #[test]
    fn test_cpu_id_case_sensitive() {
        let changed = base_raw().with(Attribute::CpuId, "ABC123");
        assert_ne!(his(&base_raw()), his(&changed));
    }

    #[test]
    fn test_serial_number_case_sensitive() {
        let changed = base_raw().with(Attribute::SerialNumber, "N123J45");
        assert_ne!(his(&base_raw()), his(&changed));
    }

    #[test]
    fn test_os_version_change_detected() {
        let changed = base_raw().with(Attribute::OsVersion, "Windows-11-10.0.26201");
        assert_ne!(his(&base_raw()), his(&changed));
    }

    #[test]
    fn test_os_version_suffix_noise_ignored() {
        let changed = base_raw().with(Attribute::OsVersion, "Windows-11-10.0.26200-SP0");
        assert_eq!(his(&base_raw()), his(&changed));
    }

    #[test]
    fn test_mac_case_and_separator_insensitive() {
        let a = base_raw().with(Attribute::MacOriginal, "aa:bb:cc:dd");
        let b = base_raw().with(Attribute::MacOriginal, "AA-BB-CC-DD");
        assert_eq!(his(&a), his(&b));
    }

    #[test]
    fn test_hash_fields_case_insensitive() {
        for attr in [
            Attribute::FirmwareHash,
            Attribute::PublicKeyFingerprint,
            Attribute::SoftwareInventoryHash,
        ] {
            let lower = base_raw().with(attr, "abc123");
            let upper = base_raw().with(attr, "ABC123");
            assert_eq!(his(&lower), his(&upper), "{attr}");
        }
    }

    #[test]
    fn test_inventory_entry_case_changes_signature() {
        let a = base_raw().with(
            Attribute::SoftwareInventoryHash,
            hash_inventory(&[InventoryEntry::new("app", "1.0")]),
        );
        let b = base_raw().with(
            Attribute::SoftwareInventoryHash,
            hash_inventory(&[InventoryEntry::new("APP", "1.0")]),
        );
        assert_ne!(his(&a), his(&b));
    }

    #[test]
    fn test_key_case_does_not_matter() {
        let upper_keys: RawAttributes = base_raw()
            .iter()
            .map(|(k, v)| (k.to_uppercase(), v.to_string()))
            .collect();
        assert_eq!(his(&base_raw()), his(&upper_keys));
    }

    #[test]
    fn test_reference_machine_end_to_end() {
        let base = his(&reference_machine());
        assert_eq!(base, his(&reference_machine()));

        // Re-supplying the same serial keeps the signature; a different case does not
        let same_serial = reference_machine().with(Attribute::SerialNumber, "NXA0MEB00A1160D9C73400");
        assert_eq!(base, his(&same_serial));
        let lower_serial = reference_machine().with(Attribute::SerialNumber, "nxa0meb00a1160d9c73400");
        assert_ne!(base, his(&lower_serial));

        let mac_reformatted = reference_machine().with(Attribute::MacOriginal, "0a-00-27-00-00-0e");
        assert_eq!(base, his(&mac_reformatted));

        let inventory_upper = reference_machine().with(
            Attribute::SoftwareInventoryHash,
            reference_machine()
                .get(Attribute::SoftwareInventoryHash)
                .unwrap()
                .to_uppercase(),
        );
        assert_eq!(base, his(&inventory_upper));
    }
}
