//! # Transition Planning
//!
//! [`plan`] is the single decision point of the lifecycle. It checks the
//! authorization table first and validates input second, so an actor who
//! may not take an action never learns whether their input was well formed.
//! Planning never mutates; committing a plan is [`Resource::apply`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bastion_core::{ResourceId, RitmNumber, Role, ValidationError};

use crate::action::LifecycleAction;
use crate::policy::rule_for;
use crate::resource::Resource;
use crate::status::ResourceStatus;

// ─── Errors ──────────────────────────────────────────────────────────

/// Why a transition was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The (role, status, action) combination is not in the table.
    #[error("role {role} may not {action} a resource in status {status}")]
    Unauthorized {
        role: Role,
        status: ResourceStatus,
        action: LifecycleAction,
    },

    /// The action is permitted but its input is malformed.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

// ─── Input / Outcome ─────────────────────────────────────────────────

/// Caller-supplied input for a transition.
///
/// The RITM number is carried raw; validation happens inside [`plan`] so
/// that it is ordered after the authorization check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionInput {
    pub ritm_number: Option<String>,
}

impl TransitionInput {
    /// No input.
    pub fn none() -> Self {
        Self::default()
    }

    /// Input carrying a RITM number.
    pub fn with_ritm(ritm: impl Into<String>) -> Self {
        Self {
            ritm_number: Some(ritm.into()),
        }
    }
}

/// The computed result of a legal transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub action: LifecycleAction,
    pub from: ResourceStatus,
    pub to: ResourceStatus,
    /// The validated RITM number to record, for reject-for-deletion only.
    pub ritm_number: Option<RitmNumber>,
}

/// Audit record of an applied transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRecord {
    pub resource_id: ResourceId,
    pub action: LifecycleAction,
    pub role: Role,
    pub from: ResourceStatus,
    pub to: ResourceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ritm_number: Option<RitmNumber>,
    pub at: DateTime<Utc>,
}

// ─── Planning ────────────────────────────────────────────────────────

/// Decide whether `role` may take `action` on `resource` with `input`, and
/// compute the resulting status and RITM number.
pub fn plan(
    resource: &Resource,
    role: Role,
    action: LifecycleAction,
    input: &TransitionInput,
) -> Result<TransitionOutcome, LifecycleError> {
    let from = resource.status();
    let rule = rule_for(role, from, action).ok_or(LifecycleError::Unauthorized {
        role,
        status: from,
        action,
    })?;

    let ritm_number = if action.requires_ritm() {
        let raw = input.ritm_number.clone().unwrap_or_default();
        Some(RitmNumber::new(raw)?)
    } else {
        None
    };

    Ok(TransitionOutcome {
        action,
        from,
        to: rule.to,
        ritm_number,
    })
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceDescriptor;
    use bastion_core::MonthlyCost;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn resource_in(status: ResourceStatus) -> Resource {
        let ritm = (status == ResourceStatus::RejectedForDeletion)
            .then(|| RitmNumber::new("RITM100245").unwrap());
        Resource::restore(
            ResourceDescriptor {
                id: ResourceId::new("1").unwrap(),
                name: "bastion-prod-westeurope".into(),
                resource_type: "Azure Bastion".into(),
                region: "West Europe".into(),
                resource_group: "rg-network-prod".into(),
                subscription_id: "sub-prod-01".into(),
                cost_per_month: MonthlyCost::from_cents(13870),
                last_used: NaiveDate::from_ymd_opt(2023, 4, 12).unwrap(),
            },
            status,
            ritm,
        )
    }

    fn any_role() -> impl Strategy<Value = Role> {
        prop::sample::select(Role::ALL.to_vec())
    }

    fn any_status() -> impl Strategy<Value = ResourceStatus> {
        prop::sample::select(ResourceStatus::ALL.to_vec())
    }

    fn any_action() -> impl Strategy<Value = LifecycleAction> {
        prop::sample::select(LifecycleAction::ALL.to_vec())
    }

    // ── Happy paths ──────────────────────────────────────────────────

    #[test]
    fn user_approves_pending_resource() {
        let mut r = resource_in(ResourceStatus::Pending);
        let record = r
            .apply(Role::User, LifecycleAction::ApproveForDeletion, &TransitionInput::none())
            .unwrap();
        assert_eq!(r.status(), ResourceStatus::ApprovedForDeletion);
        assert_eq!(record.from, ResourceStatus::Pending);
        assert_eq!(record.to, ResourceStatus::ApprovedForDeletion);
        assert_eq!(record.role, Role::User);
        assert!(r.ritm_number().is_none());
    }

    #[test]
    fn user_keeps_resource_with_valid_ritm() {
        let mut r = resource_in(ResourceStatus::Pending);
        let record = r
            .apply(
                Role::User,
                LifecycleAction::RejectForDeletion,
                &TransitionInput::with_ritm("RITM123456"),
            )
            .unwrap();
        assert_eq!(r.status(), ResourceStatus::RejectedForDeletion);
        assert_eq!(r.ritm_number().unwrap().as_str(), "RITM123456");
        assert_eq!(record.ritm_number.unwrap().as_str(), "RITM123456");
        assert!(r.is_consistent());
    }

    #[test]
    fn admin_confirms_and_rejects_requested_deletion() {
        let mut confirmed = resource_in(ResourceStatus::ApprovedForDeletion);
        confirmed
            .apply(Role::Admin, LifecycleAction::ConfirmDeletion, &TransitionInput::none())
            .unwrap();
        assert_eq!(confirmed.status(), ResourceStatus::DeletionApproved);

        let mut refused = resource_in(ResourceStatus::ApprovedForDeletion);
        refused
            .apply(Role::Admin, LifecycleAction::RejectDeletion, &TransitionInput::none())
            .unwrap();
        assert_eq!(refused.status(), ResourceStatus::DeletionRejected);
    }

    #[test]
    fn full_delete_lifecycle() {
        let mut r = resource_in(ResourceStatus::Pending);
        r.apply(Role::User, LifecycleAction::ApproveForDeletion, &TransitionInput::none())
            .unwrap();
        r.apply(Role::Admin, LifecycleAction::ConfirmDeletion, &TransitionInput::none())
            .unwrap();
        assert_eq!(r.status(), ResourceStatus::DeletionApproved);
        assert!(r.available_actions(Role::User).is_empty());
        assert!(r.available_actions(Role::Admin).is_empty());
    }

    // ── Refusals ─────────────────────────────────────────────────────

    #[test]
    fn admin_approve_for_deletion_is_unauthorized() {
        let mut r = resource_in(ResourceStatus::Pending);
        let before = r.clone();
        let err = r
            .apply(Role::Admin, LifecycleAction::ApproveForDeletion, &TransitionInput::none())
            .unwrap_err();
        assert_eq!(
            err,
            LifecycleError::Unauthorized {
                role: Role::Admin,
                status: ResourceStatus::Pending,
                action: LifecycleAction::ApproveForDeletion,
            }
        );
        assert_eq!(r, before);
    }

    #[test]
    fn short_ritm_fails_validation_and_stays_pending() {
        let mut r = resource_in(ResourceStatus::Pending);
        let err = r
            .apply(
                Role::User,
                LifecycleAction::RejectForDeletion,
                &TransitionInput::with_ritm("RITM42"),
            )
            .unwrap_err();
        assert_eq!(
            err,
            LifecycleError::Validation(ValidationError::InvalidRitm("RITM42".into()))
        );
        assert_eq!(r.status(), ResourceStatus::Pending);
        assert!(r.ritm_number().is_none());
    }

    #[test]
    fn missing_ritm_fails_validation() {
        let r = resource_in(ResourceStatus::Pending);
        let err = plan(
            &r,
            Role::User,
            LifecycleAction::RejectForDeletion,
            &TransitionInput::none(),
        )
        .unwrap_err();
        assert_eq!(err, LifecycleError::Validation(ValidationError::MissingRitm));
    }

    #[test]
    fn authorization_is_checked_before_validation() {
        let r = resource_in(ResourceStatus::ApprovedForDeletion);
        let err = plan(
            &r,
            Role::User,
            LifecycleAction::RejectForDeletion,
            &TransitionInput::with_ritm("bogus"),
        )
        .unwrap_err();
        assert!(matches!(err, LifecycleError::Unauthorized { .. }));
    }

    #[test]
    fn ritm_is_ignored_for_actions_that_do_not_need_it() {
        let r = resource_in(ResourceStatus::Pending);
        let outcome = plan(
            &r,
            Role::User,
            LifecycleAction::ApproveForDeletion,
            &TransitionInput::with_ritm("RITM123456"),
        )
        .unwrap();
        assert!(outcome.ritm_number.is_none());
    }

    #[test]
    fn record_serializes_camel_case() {
        let mut r = resource_in(ResourceStatus::Pending);
        let record = r
            .apply(
                Role::User,
                LifecycleAction::RejectForDeletion,
                &TransitionInput::with_ritm("RITM123456"),
            )
            .unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["resourceId"], "1");
        assert_eq!(json["action"], "reject-for-deletion");
        assert_eq!(json["to"], "rejected_for_deletion");
        assert_eq!(json["ritmNumber"], "RITM123456");
    }

    // ── Properties ───────────────────────────────────────────────────

    proptest! {
        #[test]
        fn refused_transitions_never_mutate(
            role in any_role(),
            status in any_status(),
            action in any_action(),
            ritm in "(RITM)?[0-9]{0,8}",
        ) {
            let mut r = resource_in(status);
            let before = r.clone();
            let input = TransitionInput::with_ritm(ritm);
            if r.apply(role, action, &input).is_err() {
                prop_assert_eq!(r, before);
            }
        }

        #[test]
        fn ritm_is_set_iff_reject_for_deletion_succeeded(
            steps in prop::collection::vec((any_role(), any_action()), 0..6),
        ) {
            let mut r = resource_in(ResourceStatus::Pending);
            let mut kept = false;
            for (role, action) in steps {
                let input = TransitionInput::with_ritm("RITM123456");
                if r.apply(role, action, &input).is_ok()
                    && action == LifecycleAction::RejectForDeletion
                {
                    kept = true;
                }
                prop_assert_eq!(r.ritm_number().is_some(), kept);
            }
        }
    }
}
