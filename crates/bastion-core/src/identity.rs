//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers. Each identifier is a distinct
//! type: a [`UserId`] cannot be passed where a [`ResourceId`] is expected.
//!
//! ## Validation
//!
//! Resource and user identifiers are opaque strings assigned by the
//! inventory and identity services; the only requirement is that they are
//! non-empty. [`RitmNumber`] references a ticket in the external ticketing
//! system and must be `RITM` followed by at least six ASCII digits.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Literal prefix of every RITM ticket reference.
pub const RITM_PREFIX: &str = "RITM";

/// Minimum number of digits following [`RITM_PREFIX`].
pub const RITM_MIN_DIGITS: usize = 6;

/// Implement `Deserialize` for string newtypes by routing the raw string
/// through the type's validating `new()` constructor.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Opaque identifiers
// ---------------------------------------------------------------------------

/// Unique identifier of a governed cloud resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResourceId(String);

impl_validating_deserialize!(ResourceId);

impl ResourceId {
    /// Create a resource identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] for an empty or
    /// whitespace-only value.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::EmptyIdentifier { kind: "resource" });
        }
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ResourceId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Unique identifier of a user known to the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(String);

impl_validating_deserialize!(UserId);

impl UserId {
    /// Create a user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] for an empty or
    /// whitespace-only value.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::EmptyIdentifier { kind: "user" });
        }
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Ticket references
// ---------------------------------------------------------------------------

/// Reference to a ticket (requested item) in the external ticketing system.
///
/// A user must supply one to keep a resource that was proposed for deletion.
///
/// # Validation
///
/// - Must start with the literal `RITM` (case-sensitive)
/// - Must be followed by at least [`RITM_MIN_DIGITS`] ASCII digits
/// - Nothing else may follow the digits; surrounding whitespace is rejected
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RitmNumber(String);

impl_validating_deserialize!(RitmNumber);

impl RitmNumber {
    /// Create a RITM number, validating the format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingRitm`] for an empty value and
    /// [`ValidationError::InvalidRitm`] for any value that does not match
    /// `RITM` followed by six or more digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.is_empty() {
            return Err(ValidationError::MissingRitm);
        }
        match s.strip_prefix(RITM_PREFIX) {
            Some(digits)
                if digits.len() >= RITM_MIN_DIGITS
                    && digits.chars().all(|c| c.is_ascii_digit()) =>
            {
                Ok(Self(s))
            }
            _ => Err(ValidationError::InvalidRitm(s)),
        }
    }

    /// Access the full reference, prefix included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric part of the reference (everything after `RITM`).
    pub fn digits(&self) -> &str {
        &self.0[RITM_PREFIX.len()..]
    }
}

impl std::fmt::Display for RitmNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RitmNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -- ResourceId --

    #[test]
    fn resource_id_accepts_opaque_strings() {
        let id = ResourceId::new("1").unwrap();
        assert_eq!(id.as_str(), "1");
        assert_eq!(id.to_string(), "1");
    }

    #[test]
    fn resource_id_rejects_blank() {
        assert_eq!(
            ResourceId::new("   "),
            Err(ValidationError::EmptyIdentifier { kind: "resource" })
        );
    }

    #[test]
    fn user_id_rejects_empty() {
        assert!(UserId::new("").is_err());
    }

    // -- RitmNumber --

    #[test]
    fn ritm_accepts_six_digits() {
        let ritm = RitmNumber::new("RITM123456").unwrap();
        assert_eq!(ritm.as_str(), "RITM123456");
        assert_eq!(ritm.digits(), "123456");
    }

    #[test]
    fn ritm_accepts_more_than_six_digits() {
        assert!(RitmNumber::new("RITM0012345678").is_ok());
    }

    #[test]
    fn ritm_rejects_too_few_digits() {
        assert_eq!(
            RitmNumber::new("RITM42"),
            Err(ValidationError::InvalidRitm("RITM42".into()))
        );
        assert!(RitmNumber::new("RITM12345").is_err());
    }

    #[test]
    fn ritm_rejects_empty_as_missing() {
        assert_eq!(RitmNumber::new(""), Err(ValidationError::MissingRitm));
    }

    #[test]
    fn ritm_rejects_wrong_prefix_and_case() {
        assert!(RitmNumber::new("ritm123456").is_err());
        assert!(RitmNumber::new("REQ123456").is_err());
        assert!(RitmNumber::new("123456").is_err());
    }

    #[test]
    fn ritm_rejects_trailing_garbage_and_whitespace() {
        assert!(RitmNumber::new("RITM123456a").is_err());
        assert!(RitmNumber::new(" RITM123456").is_err());
        assert!(RitmNumber::new("RITM123456 ").is_err());
        assert!(RitmNumber::new("RITM12345６").is_err());
    }

    #[test]
    fn ritm_deserialization_validates() {
        let ok: RitmNumber = serde_json::from_str("\"RITM654321\"").unwrap();
        assert_eq!(ok.as_str(), "RITM654321");
        let bad: Result<RitmNumber, _> = serde_json::from_str("\"RITM42\"");
        assert!(bad.is_err());
    }

    #[test]
    fn ritm_serializes_as_plain_string() {
        let ritm = RitmNumber::new("RITM123456").unwrap();
        assert_eq!(serde_json::to_string(&ritm).unwrap(), "\"RITM123456\"");
    }

    proptest! {
        #[test]
        fn ritm_accepts_every_long_enough_digit_run(digits in "[0-9]{6,20}") {
            let raw = format!("RITM{digits}");
            prop_assert!(RitmNumber::new(raw).is_ok());
        }

        #[test]
        fn ritm_rejects_every_short_digit_run(digits in "[0-9]{0,5}") {
            let raw = format!("RITM{digits}");
            prop_assert!(RitmNumber::new(raw).is_err());
        }
    }
}
