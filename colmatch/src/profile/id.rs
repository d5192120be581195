//! Content-addressed identity for column profiles.

use std::fmt;

use sha2::{Digest, Sha256};

use super::column::ColumnProfile;

/// SHA-256 fingerprint of a profile's canonical JSON encoding.
///
/// Used only as an identity surrogate for deduplication, never for ordering
/// or scoring. Two profiles with identical content share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnProfileId([u8; 32]);

impl ColumnProfileId {
    /// Fingerprints `profile`.
    ///
    /// # Panics
    ///
    /// Panics if the profile cannot be serialized. Profiles hold only strings,
    /// finite floats, and a closed enum, so this indicates a broken invariant
    /// rather than bad input.
    pub fn of(profile: &ColumnProfile) -> Self {
        #[allow(clippy::expect_used)]
        let canonical =
            serde_json::to_vec(profile).expect("column profiles always serialize to JSON");
        let digest = Sha256::digest(&canonical);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Lower-case hex rendering of the digest.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ColumnProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A candidate correspondence between two profiles, identified by id.
///
/// Equality is orientation-sensitive; use [`ColumnProfilePair::mirrored`] to
/// look up the reverse orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnProfilePair {
    pub left: ColumnProfileId,
    pub right: ColumnProfileId,
}

impl ColumnProfilePair {
    pub fn new(left: ColumnProfileId, right: ColumnProfileId) -> Self {
        Self { left, right }
    }

    /// Builds the pair by fingerprinting both profiles.
    pub fn of(left: &ColumnProfile, right: &ColumnProfile) -> Self {
        Self::new(ColumnProfileId::of(left), ColumnProfileId::of(right))
    }

    /// The same pair with sides swapped.
    pub fn mirrored(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
        }
    }
}
