//! # Validation Errors
//!
//! Errors raised when a domain primitive is constructed from invalid input.
//! Every variant carries the offending value so that the caller can echo it
//! back to the user.

use thiserror::Error;

/// A domain primitive failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A ticket reference was required but none was supplied.
    #[error("a RITM number is required to keep a resource")]
    MissingRitm,

    /// The ticket reference does not match `RITM` followed by six or more digits.
    #[error("invalid RITM number {0:?}: expected RITM followed by at least 6 digits (e.g. RITM123456)")]
    InvalidRitm(String),

    /// An identifier was empty or whitespace only.
    #[error("{kind} identifier must not be empty")]
    EmptyIdentifier {
        /// Which identifier namespace was being constructed.
        kind: &'static str,
    },

    /// A monthly cost was negative, NaN, or infinite.
    #[error("invalid monthly cost {0}: must be a finite, non-negative amount")]
    InvalidCost(String),

    /// A role name other than `user` or `admin`.
    #[error("unknown role {0:?}: expected \"user\" or \"admin\"")]
    UnknownRole(String),
}
