//! # bastion-store: Resource Store
//!
//! Holds the authoritative list of governed resources. The store is an
//! explicitly owned object shared through a cloneable handle
//! ([`ResourceStore`]); every status change goes through
//! [`ResourceStore::apply_transition`], which delegates the decision to the
//! lifecycle engine and commits the result under a single write lock.
//!
//! Derived views (counts, potential savings, search, pending queue, history)
//! live in [`aggregates`] as pure functions over a resource slice and are
//! recomputed on every read.

pub mod aggregates;
pub mod error;
pub mod fixtures;
pub mod store;

pub use aggregates::DashboardSummary;
pub use error::StoreError;
pub use store::ResourceStore;
