//! # bastion-state: Resource Lifecycle Engine
//!
//! Implements the two-stage deletion-approval state machine for governed
//! resources. A resource owner first declares a pending resource unused
//! (approve-for-deletion) or keeps it with a ticket reference
//! (reject-for-deletion); an administrator then confirms or rejects the
//! deletion.
//!
//! ## States
//!
//! ```text
//!                      ┌── approve-for-deletion (user) ──▶ ApprovedForDeletion ──┬── confirm-delete (admin) ──▶ DeletionApproved
//!   Pending ───────────┤                                                         └── reject-delete (admin) ───▶ DeletionRejected
//!                      └── reject-for-deletion (user, RITM) ──▶ RejectedForDeletion
//!
//!   Deleted: terminal, only ever reported by the inventory service.
//! ```
//!
//! ## Design
//!
//! The status is an enum with runtime-validated transitions rather than a
//! typestate: resources arrive from an upstream API in any status, and the
//! presentation layer must be able to ask "which actions are available?"
//! for a value whose status is only known at runtime. Authorization is an
//! explicit table ([`policy::TRANSITIONS`]) keyed by (role, status, action),
//! and every transition goes through [`lifecycle::plan`], which decides
//! legality and computes the outcome without mutating anything.

pub mod action;
pub mod lifecycle;
pub mod policy;
pub mod resource;
pub mod status;

pub use action::LifecycleAction;
pub use lifecycle::{plan, LifecycleError, TransitionInput, TransitionOutcome, TransitionRecord};
pub use policy::{available_actions, is_permitted, rule_for, TransitionRule, TRANSITIONS};
pub use resource::{Resource, ResourceDescriptor};
pub use status::ResourceStatus;
