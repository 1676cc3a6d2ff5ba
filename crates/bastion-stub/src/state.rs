//! Shared server state.

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use bastion_core::User;
use bastion_store::fixtures::{self, FixtureError};
use bastion_store::ResourceStore;

struct Inner {
    store: ResourceStore,
    users: Vec<User>,
    tokens: DashMap<String, User>,
}

/// Shared application state. Cheaply cloneable; all clones share the same
/// data.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    pub fn new(store: ResourceStore, users: Vec<User>) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                users,
                tokens: DashMap::new(),
            }),
        }
    }

    /// State seeded with the demo fixtures.
    pub fn demo() -> Result<Self, FixtureError> {
        Ok(Self::new(fixtures::demo_store()?, fixtures::demo_users()?))
    }

    pub fn store(&self) -> &ResourceStore {
        &self.inner.store
    }

    pub fn users(&self) -> &[User] {
        &self.inner.users
    }

    /// Issue a fresh bearer token for `user`.
    pub fn issue_token(&self, user: &User) -> String {
        let token = Uuid::new_v4().to_string();
        self.inner.tokens.insert(token.clone(), user.clone());
        token
    }

    /// The user a token was issued to.
    pub fn user_for_token(&self, token: &str) -> Option<User> {
        self.inner.tokens.get(token).map(|u| u.clone())
    }
}
