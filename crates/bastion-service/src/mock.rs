//! # In-Memory Backend
//!
//! A [`GovernanceApi`] that keeps its own resource store instead of calling
//! a remote service. Used for offline mode and tests.
//!
//! Endpoints act with a fixed role, as the upstream service does for an
//! unauthenticated caller: the owner endpoints as [`Role::User`], the
//! `/admin` endpoints as [`Role::Admin`]. Refusals come back as the same
//! status codes the HTTP service uses.

use async_trait::async_trait;
use dashmap::DashMap;

use bastion_client::{ErrorBody, GovernanceApi, GovernanceApiError, LoginResponse};
use bastion_core::{ResourceId, RitmNumber, Role, User};
use bastion_state::{LifecycleAction, LifecycleError, Resource, TransitionInput};
use bastion_store::fixtures::{self, FixtureError};
use bastion_store::{ResourceStore, StoreError};

/// In-memory stand-in for the upstream governance service.
#[derive(Debug, Clone)]
pub struct InMemoryApi {
    store: ResourceStore,
    users: Vec<User>,
    sessions: std::sync::Arc<DashMap<String, User>>,
}

impl InMemoryApi {
    pub fn new(store: ResourceStore, users: Vec<User>) -> Self {
        Self {
            store,
            users,
            sessions: Default::default(),
        }
    }

    /// Backend seeded with the demo fixtures.
    pub fn demo() -> Result<Self, FixtureError> {
        Ok(Self::new(fixtures::demo_store()?, fixtures::demo_users()?))
    }

    /// The backend's own store, i.e. the "server side" state.
    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The user a previously issued token belongs to.
    pub fn user_for_token(&self, token: &str) -> Option<User> {
        self.sessions.get(token).map(|u| u.clone())
    }

    fn transition(
        &self,
        endpoint: String,
        id: &ResourceId,
        action: LifecycleAction,
        role: Role,
        input: TransitionInput,
    ) -> Result<Resource, GovernanceApiError> {
        self.store
            .apply_transition(id, action, role, &input)
            .map_err(|e| store_error_to_api(endpoint, e))
    }
}

fn store_error_to_api(endpoint: String, e: StoreError) -> GovernanceApiError {
    let (status, code) = match &e {
        StoreError::NotFound(_) => (404, "NOT_FOUND"),
        StoreError::Lifecycle(LifecycleError::Unauthorized { .. }) => (403, "FORBIDDEN"),
        StoreError::Lifecycle(LifecycleError::Validation(_)) => (422, "VALIDATION_ERROR"),
        StoreError::DuplicateId(_) => (409, "CONFLICT"),
    };
    let body = serde_json::to_string(&ErrorBody::new(code, e.to_string())).unwrap_or_default();
    GovernanceApiError::Api {
        endpoint,
        status,
        body,
    }
}

#[async_trait]
impl GovernanceApi for InMemoryApi {
    async fn list_resources(&self) -> Result<Vec<Resource>, GovernanceApiError> {
        Ok(self.store.list())
    }

    async fn approve_for_deletion(&self, id: &ResourceId) -> Result<Resource, GovernanceApiError> {
        self.transition(
            format!("POST /resources/{id}/approve"),
            id,
            LifecycleAction::ApproveForDeletion,
            Role::User,
            TransitionInput::none(),
        )
    }

    async fn reject_for_deletion(
        &self,
        id: &ResourceId,
        ritm_number: &RitmNumber,
    ) -> Result<Resource, GovernanceApiError> {
        self.transition(
            format!("POST /resources/{id}/reject"),
            id,
            LifecycleAction::RejectForDeletion,
            Role::User,
            TransitionInput::with_ritm(ritm_number.as_str()),
        )
    }

    async fn confirm_deletion(&self, id: &ResourceId) -> Result<Resource, GovernanceApiError> {
        self.transition(
            format!("POST /admin/resources/{id}/approve"),
            id,
            LifecycleAction::ConfirmDeletion,
            Role::Admin,
            TransitionInput::none(),
        )
    }

    async fn reject_deletion(&self, id: &ResourceId) -> Result<Resource, GovernanceApiError> {
        self.transition(
            format!("POST /admin/resources/{id}/reject"),
            id,
            LifecycleAction::RejectDeletion,
            Role::Admin,
            TransitionInput::none(),
        )
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, GovernanceApiError> {
        let user = match fixtures::find_user_by_email(&self.users, email) {
            Some(user) if !password.is_empty() => user.clone(),
            _ => {
                let body = serde_json::to_string(&ErrorBody::new(
                    "UNAUTHORIZED",
                    "invalid credentials",
                ))
                .unwrap_or_default();
                return Err(GovernanceApiError::Api {
                    endpoint: "POST /auth/login".into(),
                    status: 401,
                    body,
                });
            }
        };
        let token = format!("mock-{}", uuid::Uuid::new_v4());
        self.sessions.insert(token.clone(), user.clone());
        Ok(LoginResponse { user, token })
    }
}
