//! # bastion-core: Foundational Types for Bastion Governance
//!
//! The leaf crate of the workspace. It defines the domain primitives that
//! every other crate shares: resource and user identifiers, the RITM ticket
//! reference required to keep a resource, monthly costs in exact cents, and
//! the closed set of user roles.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `ResourceId`, `UserId` and
//!    `RitmNumber` are distinct types with validated constructors. No bare
//!    strings for identifiers.
//!
//! 2. **Validation at the boundary.** String newtypes validate on
//!    construction *and* on deserialization, so malformed values coming from
//!    an upstream API are rejected before they reach the lifecycle engine.
//!
//! 3. **Exact money.** [`MonthlyCost`] stores integer cents; sums over a
//!    resource set never accumulate floating point error.
//!
//! 4. **Closed role set.** [`Role`] is an enum, and every authorization
//!    decision matches on it exhaustively.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `bastion-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod cost;
pub mod error;
pub mod identity;
pub mod user;

pub use cost::MonthlyCost;
pub use error::ValidationError;
pub use identity::{ResourceId, RitmNumber, UserId, RITM_MIN_DIGITS, RITM_PREFIX};
pub use user::{Role, User};
