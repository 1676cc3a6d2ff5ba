//! # Derived Aggregates
//!
//! Pure functions over a resource slice. Nothing here is cached; callers
//! pass the current contents of the store on every read.

use serde::Serialize;

use bastion_core::MonthlyCost;
use bastion_state::{Resource, ResourceStatus};

/// Number of resources in exactly `status`.
pub fn count_with_status(resources: &[Resource], status: ResourceStatus) -> usize {
    resources.iter().filter(|r| r.status() == status).count()
}

/// Number of resources awaiting the owner's decision.
pub fn pending_count(resources: &[Resource]) -> usize {
    count_with_status(resources, ResourceStatus::Pending)
}

/// Number of resources awaiting administrator confirmation.
pub fn approved_for_deletion_count(resources: &[Resource]) -> usize {
    count_with_status(resources, ResourceStatus::ApprovedForDeletion)
}

pub fn total_count(resources: &[Resource]) -> usize {
    resources.len()
}

/// Monthly cost whose keep-or-delete outcome is not settled yet: the sum
/// over `pending` and `approved_for_deletion` resources.
pub fn potential_savings(resources: &[Resource]) -> MonthlyCost {
    resources
        .iter()
        .filter(|r| r.status().is_cost_unsettled())
        .map(|r| r.cost_per_month)
        .sum()
}

/// Case-insensitive substring search over name, resource group, region and
/// RITM number. A blank query returns every resource.
pub fn search(query: &str, resources: &[Resource]) -> Vec<Resource> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return resources.to_vec();
    }
    resources
        .iter()
        .filter(|r| matches_query(r, &needle))
        .cloned()
        .collect()
}

fn matches_query(resource: &Resource, needle: &str) -> bool {
    let hit = |field: &str| field.to_lowercase().contains(needle);
    hit(&resource.name)
        || hit(&resource.resource_group)
        || hit(&resource.region)
        || resource.ritm_number().is_some_and(|n| hit(n.as_str()))
}

/// Resources still waiting for the owner ("to process").
pub fn pending_queue(resources: &[Resource]) -> Vec<Resource> {
    resources
        .iter()
        .filter(|r| r.status() == ResourceStatus::Pending)
        .cloned()
        .collect()
}

/// Resources on which a decision has been taken.
pub fn history_view(resources: &[Resource]) -> Vec<Resource> {
    resources
        .iter()
        .filter(|r| r.status() != ResourceStatus::Pending)
        .cloned()
        .collect()
}

/// Count per status, in lifecycle order, including zero counts.
pub fn counts_by_status(resources: &[Resource]) -> Vec<(ResourceStatus, usize)> {
    ResourceStatus::ALL
        .iter()
        .map(|&s| (s, count_with_status(resources, s)))
        .collect()
}

/// Headline figures for the administrator dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total: usize,
    pub pending: usize,
    pub approved_for_deletion: usize,
    pub potential_savings: MonthlyCost,
}

impl DashboardSummary {
    pub fn compute(resources: &[Resource]) -> Self {
        Self {
            total: total_count(resources),
            pending: pending_count(resources),
            approved_for_deletion: approved_for_deletion_count(resources),
            potential_savings: potential_savings(resources),
        }
    }
}
