//! # Authorization Table
//!
//! The complete set of legal (role, status, action) combinations. Anything
//! not listed in [`TRANSITIONS`] is an authorization failure.

use bastion_core::Role;

use crate::action::LifecycleAction;
use crate::status::ResourceStatus;

/// One row of the authorization table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub role: Role,
    pub from: ResourceStatus,
    pub action: LifecycleAction,
    pub to: ResourceStatus,
}

/// Every permitted transition.
pub const TRANSITIONS: [TransitionRule; 4] = [
    TransitionRule {
        role: Role::User,
        from: ResourceStatus::Pending,
        action: LifecycleAction::ApproveForDeletion,
        to: ResourceStatus::ApprovedForDeletion,
    },
    TransitionRule {
        role: Role::User,
        from: ResourceStatus::Pending,
        action: LifecycleAction::RejectForDeletion,
        to: ResourceStatus::RejectedForDeletion,
    },
    TransitionRule {
        role: Role::Admin,
        from: ResourceStatus::ApprovedForDeletion,
        action: LifecycleAction::ConfirmDeletion,
        to: ResourceStatus::DeletionApproved,
    },
    TransitionRule {
        role: Role::Admin,
        from: ResourceStatus::ApprovedForDeletion,
        action: LifecycleAction::RejectDeletion,
        to: ResourceStatus::DeletionRejected,
    },
];

/// Look up the rule for a combination, if one exists.
pub fn rule_for(
    role: Role,
    status: ResourceStatus,
    action: LifecycleAction,
) -> Option<&'static TransitionRule> {
    TRANSITIONS
        .iter()
        .find(|r| r.role == role && r.from == status && r.action == action)
}

/// Whether `role` may take `action` on a resource in `status`.
pub fn is_permitted(role: Role, status: ResourceStatus, action: LifecycleAction) -> bool {
    rule_for(role, status, action).is_some()
}

/// The actions `role` may take on a resource in `status`, in table order.
pub fn available_actions(role: Role, status: ResourceStatus) -> Vec<LifecycleAction> {
    TRANSITIONS
        .iter()
        .filter(|r| r.role == role && r.from == status)
        .map(|r| r.action)
        .collect()
}
