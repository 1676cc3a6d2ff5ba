//! # Governed Resource
//!
//! A cloud resource tracked through the deletion-approval lifecycle.
//!
//! Descriptive attributes are public and immutable by convention. The
//! lifecycle attributes (`status`, `ritm_number`) are private: the only way
//! to change them is [`Resource::apply`], which routes through
//! [`crate::lifecycle::plan`].

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use bastion_core::{MonthlyCost, ResourceId, RitmNumber, Role};

use crate::action::LifecycleAction;
use crate::lifecycle::{plan, LifecycleError, TransitionInput, TransitionOutcome, TransitionRecord};
use crate::status::ResourceStatus;

/// The immutable description of a resource, as produced by inventory
/// collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub id: ResourceId,
    pub name: String,
    pub resource_type: String,
    pub region: String,
    pub resource_group: String,
    pub subscription_id: String,
    pub cost_per_month: MonthlyCost,
    pub last_used: NaiveDate,
}

/// A governed resource and its lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub region: String,
    pub resource_group: String,
    pub subscription_id: String,
    pub cost_per_month: MonthlyCost,
    pub last_used: NaiveDate,
    status: ResourceStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "stored_ritm"
    )]
    ritm_number: Option<RitmNumber>,
}

/// Read a recorded RITM number leniently. A malformed value is dropped
/// with a warning so one bad record does not fail a whole listing; the
/// store then reports the record as inconsistent.
fn stored_ritm<'de, D>(deserializer: D) -> Result<Option<RitmNumber>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| match RitmNumber::new(raw.as_str()) {
        Ok(ritm) => Some(ritm),
        Err(e) => {
            tracing::warn!(ritm_number = %raw, error = %e, "ignoring malformed stored ritm number");
            None
        }
    }))
}

impl Resource {
    /// Create a newly discovered resource in [`ResourceStatus::Pending`].
    pub fn new(descriptor: ResourceDescriptor) -> Self {
        Self::restore(descriptor, ResourceStatus::Pending, None)
    }

    /// Rebuild a resource whose lifecycle state was recorded elsewhere,
    /// e.g. by the upstream inventory service.
    pub fn restore(
        descriptor: ResourceDescriptor,
        status: ResourceStatus,
        ritm_number: Option<RitmNumber>,
    ) -> Self {
        let ResourceDescriptor {
            id,
            name,
            resource_type,
            region,
            resource_group,
            subscription_id,
            cost_per_month,
            last_used,
        } = descriptor;
        Self {
            id,
            name,
            resource_type,
            region,
            resource_group,
            subscription_id,
            cost_per_month,
            last_used,
            status,
            ritm_number,
        }
    }

    /// Current lifecycle status.
    pub fn status(&self) -> ResourceStatus {
        self.status
    }

    /// The ticket reference given when the owner kept the resource.
    pub fn ritm_number(&self) -> Option<&RitmNumber> {
        self.ritm_number.as_ref()
    }

    /// Whether the RITM number agrees with the status: present exactly when
    /// the resource was kept through reject-for-deletion.
    pub fn is_consistent(&self) -> bool {
        self.ritm_number.is_some() == (self.status == ResourceStatus::RejectedForDeletion)
    }

    /// Actions `role` may take on this resource right now.
    pub fn available_actions(&self, role: Role) -> Vec<LifecycleAction> {
        crate::policy::available_actions(role, self.status)
    }

    /// Plan and commit a transition.
    ///
    /// On error the resource is left untouched.
    pub fn apply(
        &mut self,
        role: Role,
        action: LifecycleAction,
        input: &TransitionInput,
    ) -> Result<TransitionRecord, LifecycleError> {
        let outcome = plan(self, role, action, input)?;
        Ok(self.commit(role, outcome))
    }

    fn commit(&mut self, role: Role, outcome: TransitionOutcome) -> TransitionRecord {
        self.status = outcome.to;
        if let Some(ritm) = &outcome.ritm_number {
            self.ritm_number = Some(ritm.clone());
        }
        TransitionRecord {
            resource_id: self.id.clone(),
            action: outcome.action,
            role,
            from: outcome.from,
            to: outcome.to,
            ritm_number: outcome.ritm_number,
            at: Utc::now(),
        }
    }
}
