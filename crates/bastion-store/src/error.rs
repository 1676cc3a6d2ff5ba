//! Store errors.

use bastion_core::ResourceId;
use bastion_state::LifecycleError;
use thiserror::Error;

/// Errors from [`crate::ResourceStore`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No resource with this id is held.
    #[error("resource {0} not found")]
    NotFound(ResourceId),

    /// A resource with this id is already held.
    #[error("duplicate resource id {0}")]
    DuplicateId(ResourceId),

    /// The lifecycle engine refused the transition.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}
