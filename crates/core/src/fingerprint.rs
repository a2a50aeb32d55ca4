//! Content fingerprints used as the ledger's duplicate key.

use sha2::{Digest, Sha256};

/// Content fingerprint of an upload: lowercase hex SHA-256 of the exact bytes.
///
/// A re-encoded copy of the same scene hashes differently and counts as a
/// separate sighting.
#[must_use]
pub fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
