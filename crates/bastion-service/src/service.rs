//! # Governance Service
//!
//! Entry point of the presentation layer. Owns a session, a store handle,
//! an upstream backend and the notification channel.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::broadcast;

use bastion_client::GovernanceApi;
use bastion_core::{ResourceId, Role, ValidationError};
use bastion_state::{plan, LifecycleAction, Resource, TransitionInput, TransitionRecord};
use bastion_store::{aggregates, DashboardSummary, ResourceStore};

use crate::error::GovernanceError;
use crate::notify::{Notification, Notifier};
use crate::session::Session;

/// Result of a refresh: the resources to show, and the error if they are
/// the last-known set rather than fresh data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub resources: Vec<Resource>,
    pub error: Option<String>,
}

impl Snapshot {
    /// Whether the upstream could not be read.
    pub fn is_stale(&self) -> bool {
        self.error.is_some()
    }
}

/// Governance workflow for one session.
#[derive(Clone)]
pub struct GovernanceService {
    api: Arc<dyn GovernanceApi>,
    store: ResourceStore,
    session: Session,
    notifier: Notifier,
}

impl std::fmt::Debug for GovernanceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GovernanceService")
            .field("session", &self.session)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl GovernanceService {
    pub fn new(api: Arc<dyn GovernanceApi>, store: ResourceStore, session: Session) -> Self {
        Self {
            api,
            store,
            session,
            notifier: Notifier::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn role(&self) -> Role {
        self.session.role()
    }

    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// Receive every notification published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    // ─── Writes ──────────────────────────────────────────────────────

    /// Perform a lifecycle action with confirmed-write semantics.
    ///
    /// The local store is updated only after the upstream service
    /// confirmed the write. The outcome is published on the notification
    /// channel in every case.
    pub async fn perform(
        &self,
        id: &ResourceId,
        action: LifecycleAction,
        input: &TransitionInput,
    ) -> Result<Resource, GovernanceError> {
        let result = self.try_perform(id, action, input).await;
        match &result {
            Ok(_) => self
                .notifier
                .publish(Notification::success(action, id.clone())),
            Err(e) => {
                tracing::warn!(
                    resource_id = %id,
                    action = %action,
                    code = e.code(),
                    error = %e,
                    "action failed"
                );
                self.notifier
                    .publish(Notification::failure(action, id.clone(), e));
            }
        }
        result
    }

    async fn try_perform(
        &self,
        id: &ResourceId,
        action: LifecycleAction,
        input: &TransitionInput,
    ) -> Result<Resource, GovernanceError> {
        let role = self.role();
        let current = self
            .store
            .get(id)
            .ok_or_else(|| GovernanceError::NotFound(id.clone()))?;
        let outcome = plan(&current, role, action, input)?;

        let confirmed = match action {
            LifecycleAction::ApproveForDeletion => self.api.approve_for_deletion(id).await,
            LifecycleAction::RejectForDeletion => {
                let ritm = outcome
                    .ritm_number
                    .as_ref()
                    .ok_or(GovernanceError::Validation(ValidationError::MissingRitm))?;
                self.api.reject_for_deletion(id, ritm).await
            }
            LifecycleAction::ConfirmDeletion => self.api.confirm_deletion(id).await,
            LifecycleAction::RejectDeletion => self.api.reject_deletion(id).await,
        }?;

        let updated = self.store.apply_transition(id, action, role, input)?;
        if confirmed.status() != updated.status() {
            tracing::warn!(
                resource_id = %id,
                local = %updated.status(),
                upstream = %confirmed.status(),
                "upstream reported a different status"
            );
        }
        Ok(updated)
    }

    /// The owner requests deletion of a pending resource.
    pub async fn approve_for_deletion(&self, id: &ResourceId) -> Result<Resource, GovernanceError> {
        self.perform(id, LifecycleAction::ApproveForDeletion, &TransitionInput::none())
            .await
    }

    /// The owner keeps a pending resource, citing a RITM ticket.
    pub async fn reject_for_deletion(
        &self,
        id: &ResourceId,
        ritm_number: &str,
    ) -> Result<Resource, GovernanceError> {
        self.perform(
            id,
            LifecycleAction::RejectForDeletion,
            &TransitionInput::with_ritm(ritm_number),
        )
        .await
    }

    /// The administrator confirms a requested deletion.
    pub async fn confirm_deletion(&self, id: &ResourceId) -> Result<Resource, GovernanceError> {
        self.perform(id, LifecycleAction::ConfirmDeletion, &TransitionInput::none())
            .await
    }

    /// The administrator refuses a requested deletion.
    pub async fn reject_deletion(&self, id: &ResourceId) -> Result<Resource, GovernanceError> {
        self.perform(id, LifecycleAction::RejectDeletion, &TransitionInput::none())
            .await
    }

    // ─── Reads ───────────────────────────────────────────────────────

    /// Reload the store from the upstream service.
    ///
    /// On failure the store keeps its contents and the snapshot carries
    /// them together with the error.
    pub async fn refresh(&self) -> Snapshot {
        let fetched = self
            .api
            .list_resources()
            .await
            .map_err(GovernanceError::from)
            .and_then(|list| self.store.replace_all(list).map_err(GovernanceError::from));

        match fetched {
            Ok(()) => {
                tracing::debug!(count = self.store.len(), "resources refreshed");
                Snapshot {
                    resources: self.store.list(),
                    error: None,
                }
            }
            Err(e) => {
                let resources = self.store.list();
                if resources.is_empty() {
                    tracing::error!(error = %e, "refresh failed with no last-known resources");
                } else {
                    tracing::warn!(error = %e, count = resources.len(), "refresh failed, serving last-known resources");
                }
                self.notifier.publish(Notification::refresh_failed(&e));
                Snapshot {
                    resources,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────

    pub fn resources(&self) -> Vec<Resource> {
        self.store.list()
    }

    pub fn get(&self, id: &ResourceId) -> Option<Resource> {
        self.store.get(id)
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary::compute(&self.store.list())
    }

    pub fn pending_queue(&self) -> Vec<Resource> {
        aggregates::pending_queue(&self.store.list())
    }

    pub fn history_view(&self) -> Vec<Resource> {
        aggregates::history_view(&self.store.list())
    }

    pub fn search(&self, query: &str) -> Vec<Resource> {
        aggregates::search(query, &self.store.list())
    }

    /// Actions the session may take on a resource.
    pub fn available_actions(&self, id: &ResourceId) -> Result<Vec<LifecycleAction>, GovernanceError> {
        self.store
            .get(id)
            .map(|r| r.available_actions(self.role()))
            .ok_or_else(|| GovernanceError::NotFound(id.clone()))
    }

    /// Transitions applied through this service's store, oldest first.
    pub fn transition_log(&self) -> Vec<TransitionRecord> {
        self.store.history()
    }
}
