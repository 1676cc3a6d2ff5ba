//! Workflow errors as seen by the presentation layer.

use thiserror::Error;

use bastion_client::GovernanceApiError;
use bastion_core::{ResourceId, Role, ValidationError};
use bastion_state::{LifecycleAction, LifecycleError, ResourceStatus};
use bastion_store::StoreError;

/// Why a governance action failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    /// The resource is not in the local store.
    #[error("resource {0} not found")]
    NotFound(ResourceId),

    /// The session's role may not take this action in the current status.
    #[error("role {role} may not {action} a resource in status {status}")]
    Unauthorized {
        role: Role,
        status: ResourceStatus,
        action: LifecycleAction,
    },

    /// Caller input is malformed.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The upstream service failed or refused the call.
    #[error("upstream failure: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// The upstream service returned data the store cannot hold.
    #[error("upstream data rejected: {0}")]
    InvalidUpstreamData(String),
}

impl GovernanceError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Upstream { .. } | Self::InvalidUpstreamData(_) => "UPSTREAM_FAILURE",
        }
    }

    /// Whether re-issuing the same action may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}

impl From<LifecycleError> for GovernanceError {
    fn from(e: LifecycleError) -> Self {
        match e {
            LifecycleError::Unauthorized {
                role,
                status,
                action,
            } => Self::Unauthorized {
                role,
                status,
                action,
            },
            LifecycleError::Validation(v) => Self::Validation(v),
        }
    }
}

impl From<StoreError> for GovernanceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::Lifecycle(l) => l.into(),
            StoreError::DuplicateId(id) => {
                Self::InvalidUpstreamData(format!("duplicate resource id {id}"))
            }
        }
    }
}

impl From<GovernanceApiError> for GovernanceError {
    fn from(e: GovernanceApiError) -> Self {
        Self::Upstream {
            status: e.status(),
            message: e.user_message(),
        }
    }
}
