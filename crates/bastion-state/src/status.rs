//! # Resource Status
//!
//! The lifecycle status of a governed resource.

use serde::{Deserialize, Serialize};

/// The lifecycle status of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    /// Awaiting the owning user's decision (initial).
    Pending,
    /// The user requested deletion; awaiting administrator confirmation.
    ApprovedForDeletion,
    /// The user kept the resource, citing a RITM ticket.
    RejectedForDeletion,
    /// The administrator confirmed the deletion (terminal).
    DeletionApproved,
    /// The administrator refused the deletion (terminal).
    DeletionRejected,
    /// The resource no longer exists (terminal).
    Deleted,
}

impl ResourceStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [ResourceStatus; 6] = [
        Self::Pending,
        Self::ApprovedForDeletion,
        Self::RejectedForDeletion,
        Self::DeletionApproved,
        Self::DeletionRejected,
        Self::Deleted,
    ];

    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::DeletionApproved | Self::DeletionRejected | Self::Deleted
        )
    }

    /// Whether the monthly cost of a resource in this status is still at
    /// stake, i.e. the keep-or-delete outcome is not settled yet.
    pub fn is_cost_unsettled(&self) -> bool {
        matches!(self, Self::Pending | Self::ApprovedForDeletion)
    }

    /// The wire name (snake_case).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::ApprovedForDeletion => "approved_for_deletion",
            Self::RejectedForDeletion => "rejected_for_deletion",
            Self::DeletionApproved => "deletion_approved",
            Self::DeletionRejected => "deletion_rejected",
            Self::Deleted => "deleted",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::ApprovedForDeletion => "Approved for deletion",
            Self::RejectedForDeletion => "Rejected for deletion",
            Self::DeletionApproved => "Deletion approved",
            Self::DeletionRejected => "Deletion rejected",
            Self::Deleted => "Deleted",
        }
    }

    /// One-line explanation shown when the caller has no action available.
    pub fn note(&self) -> &'static str {
        match self {
            Self::Pending => "Awaiting the owner's decision.",
            Self::ApprovedForDeletion => "Awaiting administrator validation.",
            Self::RejectedForDeletion => "Resource kept.",
            Self::DeletionApproved => "Deletion approved by the administrator.",
            Self::DeletionRejected => "Deletion rejected by the administrator.",
            Self::Deleted => "Resource deleted.",
        }
    }
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        let terminal: Vec<_> = ResourceStatus::ALL
            .iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(
            terminal,
            vec![
                &ResourceStatus::DeletionApproved,
                &ResourceStatus::DeletionRejected,
                &ResourceStatus::Deleted
            ]
        );
        assert!(!ResourceStatus::RejectedForDeletion.is_terminal());
    }

    #[test]
    fn wire_names_match_serde() {
        for status in ResourceStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn unsettled_cost_statuses() {
        assert!(ResourceStatus::Pending.is_cost_unsettled());
        assert!(ResourceStatus::ApprovedForDeletion.is_cost_unsettled());
        assert!(!ResourceStatus::RejectedForDeletion.is_cost_unsettled());
        assert!(!ResourceStatus::DeletionApproved.is_cost_unsettled());
    }
}
