//! # Resource Store Handle
//!
//! Thread-safe, cloneable, insertion-ordered resource set. The lock is
//! `parking_lot` and is never held across `.await` points.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use bastion_core::{ResourceId, Role};
use bastion_state::{LifecycleAction, Resource, TransitionInput, TransitionRecord};

use crate::error::StoreError;

#[derive(Debug, Default)]
struct Inner {
    resources: Vec<Resource>,
    log: Vec<TransitionRecord>,
}

/// Shared handle to the resource set. All clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    inner: Arc<RwLock<Inner>>,
}

impl ResourceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `resources` in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if two resources share an id.
    pub fn from_resources(resources: Vec<Resource>) -> Result<Self, StoreError> {
        let store = Self::new();
        store.replace_all(resources)?;
        Ok(store)
    }

    /// All resources in insertion order.
    pub fn list(&self) -> Vec<Resource> {
        self.inner.read().resources.clone()
    }

    /// A single resource by id.
    pub fn get(&self, id: &ResourceId) -> Option<Resource> {
        self.inner
            .read()
            .resources
            .iter()
            .find(|r| &r.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a resource.
    pub fn insert(&self, resource: Resource) -> Result<(), StoreError> {
        let mut guard = self.inner.write();
        if guard.resources.iter().any(|r| r.id == resource.id) {
            return Err(StoreError::DuplicateId(resource.id));
        }
        warn_if_inconsistent(&resource);
        guard.resources.push(resource);
        Ok(())
    }

    /// Apply a lifecycle transition to one resource.
    ///
    /// Lookup, decision and commit happen under one write lock: either the
    /// status (and RITM number) change together and a record is appended to
    /// the transition log, or nothing changes.
    pub fn apply_transition(
        &self,
        id: &ResourceId,
        action: LifecycleAction,
        role: Role,
        input: &TransitionInput,
    ) -> Result<Resource, StoreError> {
        let mut guard = self.inner.write();
        let Inner { resources, log } = &mut *guard;
        let resource = resources
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        match resource.apply(role, action, input) {
            Ok(record) => {
                tracing::info!(
                    resource_id = %id,
                    action = %action,
                    role = %role,
                    from = %record.from,
                    to = %record.to,
                    "transition applied"
                );
                let updated = resource.clone();
                log.push(record);
                Ok(updated)
            }
            Err(e) => {
                tracing::warn!(resource_id = %id, action = %action, role = %role, error = %e, "transition refused");
                Err(e.into())
            }
        }
    }

    /// Replace the whole resource set, keeping the order of `resources`.
    ///
    /// The transition log is kept. On error the store is unchanged.
    pub fn replace_all(&self, resources: Vec<Resource>) -> Result<(), StoreError> {
        let mut seen = HashSet::with_capacity(resources.len());
        for r in &resources {
            if !seen.insert(&r.id) {
                return Err(StoreError::DuplicateId(r.id.clone()));
            }
            warn_if_inconsistent(r);
        }
        self.inner.write().resources = resources;
        Ok(())
    }

    /// Every transition applied through this store, oldest first.
    pub fn history(&self) -> Vec<TransitionRecord> {
        self.inner.read().log.clone()
    }

    /// Transitions applied to one resource, oldest first.
    pub fn history_for(&self, id: &ResourceId) -> Vec<TransitionRecord> {
        self.inner
            .read()
            .log
            .iter()
            .filter(|rec| &rec.resource_id == id)
            .cloned()
            .collect()
    }
}

fn warn_if_inconsistent(resource: &Resource) {
    if !resource.is_consistent() {
        tracing::warn!(
            resource_id = %resource.id,
            status = %resource.status(),
            has_ritm = resource.ritm_number().is_some(),
            "ritm number does not match status"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use bastion_state::ResourceStatus;

    fn id(s: &str) -> ResourceId {
        ResourceId::new(s).unwrap()
    }

    #[test]
    fn list_keeps_insertion_order() {
        let store = fixtures::demo_store().unwrap();
        let ids: Vec<_> = store.list().into_iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn transition_is_visible_to_next_read() {
        let store = fixtures::demo_store().unwrap();
        let updated = store
            .apply_transition(
                &id("1"),
                LifecycleAction::ApproveForDeletion,
                Role::User,
                &TransitionInput::none(),
            )
            .unwrap();
        assert_eq!(updated.status(), ResourceStatus::ApprovedForDeletion);
        assert_eq!(
            store.get(&id("1")).unwrap().status(),
            ResourceStatus::ApprovedForDeletion
        );
        let ids: Vec<_> = store.list().into_iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = fixtures::demo_store().unwrap();
        let err = store
            .apply_transition(
                &id("99"),
                LifecycleAction::ApproveForDeletion,
                Role::User,
                &TransitionInput::none(),
            )
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound(id("99")));
    }

    #[test]
    fn refused_transition_leaves_store_and_log_unchanged() {
        let store = fixtures::demo_store().unwrap();
        let before = store.list();
        let err = store
            .apply_transition(
                &id("1"),
                LifecycleAction::RejectForDeletion,
                Role::User,
                &TransitionInput::with_ritm("RITM42"),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Lifecycle(_)));
        assert_eq!(store.list(), before);
        assert!(store.history().is_empty());
    }

    #[test]
    fn applied_transitions_are_logged() {
        let store = fixtures::demo_store().unwrap();
        store
            .apply_transition(
                &id("3"),
                LifecycleAction::RejectForDeletion,
                Role::User,
                &TransitionInput::with_ritm("RITM123456"),
            )
            .unwrap();
        store
            .apply_transition(
                &id("2"),
                LifecycleAction::ConfirmDeletion,
                Role::Admin,
                &TransitionInput::none(),
            )
            .unwrap();
        let log = store.history();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].resource_id, id("3"));
        assert_eq!(log[0].ritm_number.as_ref().unwrap().as_str(), "RITM123456");
        assert_eq!(log[1].to, ResourceStatus::DeletionApproved);
        assert_eq!(store.history_for(&id("2")).len(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let store = fixtures::demo_store().unwrap();
        let first = store.get(&id("1")).unwrap();
        assert_eq!(store.insert(first.clone()), Err(StoreError::DuplicateId(id("1"))));

        let before = store.list();
        assert!(store.replace_all(vec![first.clone(), first]).is_err());
        assert_eq!(store.list(), before);
    }

    #[test]
    fn clones_share_data() {
        let store = fixtures::demo_store().unwrap();
        let other = store.clone();
        other
            .apply_transition(
                &id("1"),
                LifecycleAction::ApproveForDeletion,
                Role::User,
                &TransitionInput::none(),
            )
            .unwrap();
        assert_eq!(
            store.get(&id("1")).unwrap().status(),
            ResourceStatus::ApprovedForDeletion
        );
    }
}
