//! Authenticated session.

use zeroize::Zeroizing;

use bastion_client::GovernanceApi;
use bastion_core::{Role, User};

use crate::error::GovernanceError;

/// The identity on whose behalf actions are taken.
///
/// The token, when present, is the bearer credential issued at login. A
/// mock session has none and talks to the upstream unauthenticated.
#[derive(Clone)]
pub struct Session {
    user: User,
    token: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Session {
    /// Log in against the upstream service.
    pub async fn login(
        api: &dyn GovernanceApi,
        email: &str,
        password: &str,
    ) -> Result<Self, GovernanceError> {
        let resp = api.login(email, password).await.map_err(|e| {
            tracing::warn!(email = %email, error = %e, "login failed");
            GovernanceError::from(e)
        })?;
        tracing::info!(user_id = %resp.user.id, role = %resp.user.role, "logged in");
        Ok(Self {
            user: resp.user,
            token: Some(Zeroizing::new(resp.token)),
        })
    }

    /// A session for `user` without credentials.
    pub fn mock(user: User) -> Self {
        Self { user, token: None }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// The role used for every authorization decision.
    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.as_str())
    }
}
