//! Record identifiers and sharded-path derivation.
//!
//! hims stores every record family under sharded directories derived from
//! the record's identifier. To keep path derivation deterministic across
//! the codebase, identifiers use a *canonical* representation: **32
//! lowercase hexadecimal characters** (no hyphens), the same value
//! `Uuid::new_v4().simple()` produces.
//!
//! For a canonical id `u`, a record lives under:
//! `parent_dir/<u[0..2]>/<u[2..4]>/<u>/`
//!
//! Sharding keeps directory fan-out bounded so a section can hold a large
//! number of records without filesystem slowdowns.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use uuid::Uuid;

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// The supplied identifier was not in canonical form.
    #[error("identifier must be 32 lowercase hex characters without hyphens, got: '{0}'")]
    NotCanonical(String),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;

/// A record identifier in canonical form.
///
/// Construct with [`RecordId::generate`] for new records, or
/// [`RecordId::parse`] to validate an externally supplied identifier (CLI
/// input, API path segment). Once constructed, the contained value is
/// guaranteed canonical, so path derivation is safe everywhere.
///
/// Non-canonical inputs (uppercase, hyphenated, wrong length, non-hex) are
/// rejected rather than normalised: a single accepted spelling keeps the
/// storage layout unambiguous.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generates a fresh identifier for a new record.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates and parses an identifier that must already be canonical.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::NotCanonical`] if `input` is not exactly 32
    /// lowercase hex characters.
    pub fn parse(input: &str) -> IdResult<Self> {
        if !Self::is_canonical(input) {
            return Err(IdError::NotCanonical(input.to_owned()));
        }
        // is_canonical guarantees valid hex, so parse_str succeeds
        let uuid = Uuid::parse_str(input).map_err(|_| IdError::NotCanonical(input.to_owned()))?;
        Ok(Self(uuid))
    }

    /// Returns true if `input` is in canonical form.
    ///
    /// Purely syntactic: exactly 32 bytes, each `0-9` or `a-f`.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Returns the canonical string form of this identifier.
    pub fn canonical(&self) -> String {
        self.0.simple().to_string()
    }

    /// Returns `parent_dir/<s1>/<s2>/<id>/` for this identifier.
    ///
    /// `s1` and `s2` are the first two and next two hex characters of the
    /// canonical form.
    pub fn sharded_dir(&self, parent_dir: &Path) -> PathBuf {
        let canonical = self.canonical();
        let s1 = &canonical[0..2];
        let s2 = &canonical[2..4];
        parent_dir.join(s1).join(s2).join(&canonical)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for RecordId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> serde::Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecordId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_canonical() {
        let id = RecordId::generate();
        assert!(RecordId::is_canonical(&id.canonical()));
        assert_eq!(id.canonical().len(), 32);
    }

    #[test]
    fn test_parse_accepts_canonical_form() {
        let input = "550e8400e29b41d4a716446655440000";
        let id = RecordId::parse(input).expect("canonical input should parse");
        assert_eq!(id.canonical(), input);
        assert_eq!(id.to_string(), input);
    }

    #[test]
    fn test_parse_rejects_non_canonical_forms() {
        let cases = [
            "550e8400-e29b-41d4-a716-446655440000", // hyphenated
            "550E8400E29B41D4A716446655440000",     // uppercase
            "550e8400",                             // too short
            "zz0e8400e29b41d4a716446655440000",     // non-hex
            "",
        ];
        for input in cases {
            let err = RecordId::parse(input).expect_err("non-canonical input should be rejected");
            assert!(matches!(err, IdError::NotCanonical(_)), "input: {input:?}");
        }
    }

    #[test]
    fn test_sharded_dir_layout() {
        let id = RecordId::parse("550e8400e29b41d4a716446655440000").unwrap();
        let dir = id.sharded_dir(Path::new("data/patients"));
        assert_eq!(
            dir,
            Path::new("data/patients/55/0e/550e8400e29b41d4a716446655440000")
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let id = RecordId::generate();
        let json = serde_json::to_string(&id).expect("should serialise");
        let back: RecordId = serde_json::from_str(&json).expect("should deserialise");
        assert_eq!(id, back);

        let err: Result<RecordId, _> = serde_json::from_str("\"not-an-id\"");
        assert!(err.is_err(), "non-canonical id should fail to deserialise");
    }
}
