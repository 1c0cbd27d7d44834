//! Software inventory hashing
//!
//! Reduces an unordered list of installed programs to one hex digest in two
//! stages: one digest per entry, then one digest over the sorted entry
//! digests. The result is written into the `software_inventory_hash` slot.

use sha2::{Digest, Sha256};

use crate::model::InventoryEntry;

/// Separator between entry digests in the second stage
pub const DIGEST_SEPARATOR: &str = "|";

/// Digest of `name:version` with both parts trimmed, case preserved
pub fn entry_digest(entry: &InventoryEntry) -> String {
    let input = format!("{}:{}", entry.name.trim(), entry.version.trim());
    sha256_hex(&input)
}

/// Two-level inventory hash, lowercase hex
pub fn hash_inventory(entries: &[InventoryEntry]) -> String {
    let mut digests: Vec<String> = entries.iter().map(entry_digest).collect();
    digests.sort();

    tracing::debug!(entries = digests.len(), "Hashing software inventory");

    sha256_hex(&digests.join(DIGEST_SEPARATOR))
}

fn sha256_hex(input: &str) -> String {
    format!("{:x}", Sha256::digest(input.as_bytes()))
}
