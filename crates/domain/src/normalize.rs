//! Per-attribute normalization
//!
//! Absorbs representational drift (separators, hex digit case, vendor
//! suffixes) while keeping real value changes visible. Every function here is
//! total: malformed input degrades to an empty or partially cleaned string.

use regex::Regex;
use std::sync::LazyLock;

use crate::model::{Attribute, NormalizedAttributes, RawAttributes};
use crate::policy::{CasePolicy, policy_for};

/// `<digits>-<digits>` followed by any number of `.<digits>` groups
static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+-\d+(?:\.\d+)*)").expect("Valid regex"));

/// Normalize every known attribute of a raw map
pub fn normalize(raw: &RawAttributes) -> NormalizedAttributes {
    NormalizedAttributes::from_values(Attribute::ALL.into_iter().map(|attr| {
        let value = raw.get(attr);
        (attr, normalize_attribute(attr, value))
    }))
}

/// Normalize a single attribute value (missing values become empty)
pub fn normalize_attribute(attr: Attribute, value: Option<&str>) -> String {
    match attr {
        Attribute::MacOriginal => normalize_mac(value),
        Attribute::FirmwareHash
        | Attribute::PublicKeyFingerprint
        | Attribute::SoftwareInventoryHash => normalize_hex_hash(value),
        Attribute::OsVersion => normalize_version(value),
        Attribute::CpuId | Attribute::SerialNumber => normalize_case(value, policy_for(attr)),
    }
}

/// Baseline cleanup: missing becomes empty, surrounding whitespace is trimmed.
///
/// The ASCII information separators `\x1c`..=`\x1f` count as whitespace here.
pub fn clean_basic(value: Option<&str>) -> String {
    value
        .map(|s| s.trim_matches(is_trimmable))
        .unwrap_or_default()
        .to_string()
}

fn is_trimmable(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\x1c'..='\x1f')
}

/// Apply a case policy on top of [`clean_basic`]
pub fn normalize_case(value: Option<&str>, policy: CasePolicy) -> String {
    let s = clean_basic(value);
    match policy {
        CasePolicy::Sensitive => s,
        CasePolicy::Insensitive => s.to_uppercase(),
    }
}

/// Keep only hex digits, uppercased
pub fn normalize_mac(value: Option<&str>) -> String {
    clean_basic(value)
        .chars()
        .filter(char::is_ascii_hexdigit)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Drop a `0x` prefix and separators, keep only hex digits, uppercased
pub fn normalize_hex_hash(value: Option<&str>) -> String {
    let s = clean_basic(value);
    let body = match s.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("0x") => &s[2..],
        _ => s.as_str(),
    };

    body.chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .filter(char::is_ascii_hexdigit)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Extract the first dash-joined numeric version fragment, or empty
pub fn normalize_version(value: Option<&str>) -> String {
    let s = clean_basic(value);
    VERSION_PATTERN
        .captures(&s)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw() -> RawAttributes {
        RawAttributes::new()
            .with(Attribute::CpuId, "  BFEBFBFF000806C1 ")
            .with(Attribute::SerialNumber, "NXA0MEB00A1160D9C73400")
            .with(Attribute::MacOriginal, "0a:00:27:00:00:0e")
            .with(Attribute::FirmwareHash, "0x663c81b7cfed")
            .with(Attribute::OsVersion, "Windows-11-10.0.26200-SP0")
            .with(Attribute::PublicKeyFingerprint, "28:6d:31:73")
            .with(Attribute::SoftwareInventoryHash, "66d64319-49b6")
    }

    #[test]
    fn test_clean_basic() {
        assert_eq!(clean_basic(None), "");
        assert_eq!(clean_basic(Some("  a b \t\n")), "a b");
    }

    #[test]
    fn test_clean_basic_strips_information_separators() {
        assert_eq!(clean_basic(Some("abc\x1f")), "abc");
        assert_eq!(clean_basic(Some("\x1c\x1d abc \x1e")), "abc");
        assert_eq!(clean_basic(Some("a\x1fb")), "a\x1fb");
        assert_eq!(
            normalize_case(Some("abc\x1f"), CasePolicy::Sensitive),
            normalize_case(Some("abc"), CasePolicy::Sensitive)
        );
    }

    #[test]
    fn test_normalize_case_policies() {
        assert_eq!(normalize_case(Some(" abC "), CasePolicy::Sensitive), "abC");
        assert_eq!(normalize_case(Some(" abC "), CasePolicy::Insensitive), "ABC");
    }

    #[test]
    fn test_mac_separator_invariance() {
        let expected = "AABBCCDDEEFF";
        for mac in [
            "aa:bb:cc:dd:ee:ff",
            "AA-BB-CC-DD-EE-FF",
            "aabb.ccdd.eeff",
            "aAbBcCdDeEfF",
            " aa-bb:cc.dd ee_ff ",
        ] {
            assert_eq!(normalize_mac(Some(mac)), expected, "input {mac:?}");
        }
    }

    #[test]
    fn test_mac_drops_non_hex_letters() {
        assert_eq!(normalize_mac(Some("MAC_UNKNOWN")), "AC");
        assert_eq!(normalize_mac(None), "");
    }

    #[test]
    fn test_hex_hash_strips_prefix_and_separators() {
        assert_eq!(normalize_hex_hash(Some("0xABcd")), "ABCD");
        assert_eq!(normalize_hex_hash(Some("0XabCD")), "ABCD");
        assert_eq!(normalize_hex_hash(Some(" ab:cd-ef 01 ")), "ABCDEF01");
        assert_eq!(normalize_hex_hash(Some("zz12gg")), "12");
    }

    #[test]
    fn test_hex_hash_prefix_only_at_start() {
        // The inner 'x' is dropped as a non-hex character, the zeros stay
        assert_eq!(normalize_hex_hash(Some("00xAB")), "00AB");
        assert_eq!(normalize_hex_hash(Some("0x")), "");
        assert_eq!(normalize_hex_hash(Some("0")), "0");
    }

    #[test]
    fn test_version_extraction() {
        assert_eq!(
            normalize_version(Some("Windows-11-10.0.26200-SP0")),
            "11-10.0.26200"
        );
        assert_eq!(
            normalize_version(Some("Windows-11-10.0.26201-SP0")),
            "11-10.0.26201"
        );
        assert_eq!(normalize_version(Some("Linux-24-6.8.0")), "24-6.8.0");
    }

    #[test]
    fn test_version_without_match_is_empty() {
        assert_eq!(normalize_version(Some("OS_NOT_DETECTED")), "");
        assert_eq!(normalize_version(Some("10.0.26200")), "");
        assert_eq!(normalize_version(None), "");
    }

    #[test]
    fn test_version_keeps_case_of_match() {
        assert_eq!(
            normalize_version(Some("windows-11-10.0.26200-sp0")),
            "11-10.0.26200"
        );
    }

    #[test]
    fn test_normalize_full_map() {
        let norm = normalize(&sample_raw());

        assert_eq!(norm.get(Attribute::CpuId), "BFEBFBFF000806C1");
        assert_eq!(norm.get(Attribute::SerialNumber), "NXA0MEB00A1160D9C73400");
        assert_eq!(norm.get(Attribute::MacOriginal), "0A002700000E");
        assert_eq!(norm.get(Attribute::FirmwareHash), "663C81B7CFED");
        assert_eq!(norm.get(Attribute::OsVersion), "11-10.0.26200");
        assert_eq!(norm.get(Attribute::PublicKeyFingerprint), "286D3173");
        assert_eq!(norm.get(Attribute::SoftwareInventoryHash), "66D6431949B6");
    }

    #[test]
    fn test_missing_keys_become_empty() {
        let norm = normalize(&RawAttributes::new());
        for attr in Attribute::ALL {
            assert_eq!(norm.get(attr), "", "{attr}");
        }
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut raw = sample_raw();
        raw.insert("gpu_id", "whatever");

        assert_eq!(normalize(&raw), normalize(&sample_raw()));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = normalize(&sample_raw());
        let twice = normalize(&once.to_raw());
        assert_eq!(once, twice);

        let messy = RawAttributes::new()
            .with(Attribute::FirmwareHash, "0x0x12")
            .with(Attribute::OsVersion, "build 3-4.5.6 rc1")
            .with(Attribute::CpuId, " \tcpu\tid ");
        let once = normalize(&messy);
        assert_eq!(normalize(&once.to_raw()), once);
    }
}
