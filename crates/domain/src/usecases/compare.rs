//! Change comparison between two attribute readings
//!
//! Answers "did anything meaningful change, and which attribute?" for a base
//! and a candidate reading of a machine.

use crate::{
    model::{AttributeChange, ComparisonReport, RawAttributes},
    signature::derive_signature,
};

/// Compare two raw readings field by field after normalization
pub fn compare(base: &RawAttributes, candidate: &RawAttributes) -> ComparisonReport {
    let base_report = derive_signature(base);
    let candidate_report = derive_signature(candidate);

    let mut changes: Vec<AttributeChange> = base_report
        .normalized
        .iter()
        .filter_map(|(attr, before)| {
            let after = candidate_report.normalized.get(attr);
            (before != after).then(|| AttributeChange {
                attribute: attr,
                base: before.to_string(),
                candidate: after.to_string(),
            })
        })
        .collect();
    changes.sort_by(|a, b| a.attribute.as_str().cmp(b.attribute.as_str()));

    tracing::debug!(changed = changes.len(), "Compared attribute readings");

    ComparisonReport {
        base_signature: base_report.signature,
        candidate_signature: candidate_report.signature,
        changes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Attribute;

    fn base() -> RawAttributes {
        RawAttributes::new()
            .with(Attribute::CpuId, "BFEBFBFF000806C1")
            .with(Attribute::SerialNumber, "NXA0MEB00A1160D9C73400")
            .with(Attribute::MacOriginal, "0A:00:27:00:00:0E")
            .with(Attribute::OsVersion, "Windows-11-10.0.26200-SP0")
    }

    #[test]
    fn test_cosmetic_change_is_not_reported() {
        let candidate = base().with(Attribute::MacOriginal, "0a-00-27-00-00-0e");
        let report = compare(&base(), &candidate);

        assert!(report.changes.is_empty());
        assert!(!report.signature_changed());
    }

    #[test]
    fn test_real_changes_are_reported_in_key_order() {
        let candidate = base()
            .with(Attribute::SerialNumber, "NXA0MEB00A1160D9C73401")
            .with(Attribute::CpuId, "bfebfbff000806c1");
        let report = compare(&base(), &candidate);

        let changed: Vec<Attribute> = report.changes.iter().map(|c| c.attribute).collect();
        assert_eq!(changed, vec![Attribute::CpuId, Attribute::SerialNumber]);
        assert_eq!(report.changes[0].candidate, "bfebfbff000806c1");
        assert!(report.signature_changed());
    }

    #[test]
    fn test_os_build_change_is_reported() {
        let candidate = base().with(Attribute::OsVersion, "Windows-11-10.0.26201-SP0");
        let report = compare(&base(), &candidate);

        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.changes[0].base, "11-10.0.26200");
        assert_eq!(report.changes[0].candidate, "11-10.0.26201");
    }
}
