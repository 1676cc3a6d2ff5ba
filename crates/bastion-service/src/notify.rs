//! # Action Notifications
//!
//! Every action outcome, success or failure, is published on a broadcast
//! channel. The presentation layer turns them into confirmation and error
//! messages.

use serde::Serialize;
use tokio::sync::broadcast;

use bastion_core::ResourceId;
use bastion_state::LifecycleAction;

use crate::error::GovernanceError;

/// Default channel capacity. Slow receivers lag rather than block senders.
pub const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Failure,
}

/// A user-facing message about one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: NotificationLevel,
    /// `None` for non-lifecycle operations such as a refresh.
    pub action: Option<LifecycleAction>,
    pub resource_id: Option<ResourceId>,
    pub title: String,
    pub message: String,
    /// Whether re-issuing the action may succeed.
    pub retryable: bool,
}

impl Notification {
    /// Confirmation for an applied transition.
    pub fn success(action: LifecycleAction, resource_id: ResourceId) -> Self {
        let (title, message) = match action {
            LifecycleAction::ApproveForDeletion => (
                "Approved for deletion",
                "Your deletion request has been forwarded to the administrators.",
            ),
            LifecycleAction::RejectForDeletion => {
                ("Deletion rejected", "You chose to keep this resource.")
            }
            LifecycleAction::ConfirmDeletion => (
                "Deletion approved",
                "The deletion was approved by the administrator.",
            ),
            LifecycleAction::RejectDeletion => (
                "Deletion rejected",
                "The deletion was rejected by the administrator.",
            ),
        };
        Self {
            level: NotificationLevel::Success,
            action: Some(action),
            resource_id: Some(resource_id),
            title: title.to_string(),
            message: message.to_string(),
            retryable: false,
        }
    }

    /// Report of a refused or failed transition.
    pub fn failure(action: LifecycleAction, resource_id: ResourceId, error: &GovernanceError) -> Self {
        let title = match error {
            GovernanceError::NotFound(_) => "Resource not found",
            GovernanceError::Unauthorized { .. } => "Action not permitted",
            GovernanceError::Validation(_) => "Invalid input",
            GovernanceError::Upstream { .. } | GovernanceError::InvalidUpstreamData(_) => {
                "Action failed"
            }
        };
        Self {
            level: NotificationLevel::Failure,
            action: Some(action),
            resource_id: Some(resource_id),
            title: title.to_string(),
            message: error.to_string(),
            retryable: error.is_retryable(),
        }
    }

    /// Report of a failed refresh.
    pub fn refresh_failed(error: &GovernanceError) -> Self {
        Self {
            level: NotificationLevel::Failure,
            action: None,
            resource_id: None,
            title: "Could not load resources".to_string(),
            message: error.to_string(),
            retryable: error.is_retryable(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NotificationLevel::Success
    }
}

/// Publishing end of the notification channel. Clones share the channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Publish to every current subscriber. Having none is not an error.
    pub fn publish(&self, notification: Notification) {
        tracing::debug!(
            level = ?notification.level,
            title = %notification.title,
            "notification"
        );
        let _ = self.tx.send(notification);
    }
}
