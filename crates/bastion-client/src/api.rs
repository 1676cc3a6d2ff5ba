//! The upstream governance API as a trait.

use async_trait::async_trait;

use bastion_core::{ResourceId, RitmNumber};
use bastion_state::Resource;

use crate::error::GovernanceApiError;
use crate::types::LoginResponse;

/// Operations offered by the upstream governance service.
///
/// Each write returns the resource as the service recorded it. A returned
/// error means the service did not confirm the write.
#[async_trait]
pub trait GovernanceApi: Send + Sync {
    /// `GET /resources`
    async fn list_resources(&self) -> Result<Vec<Resource>, GovernanceApiError>;

    /// `POST /resources/{id}/approve`
    async fn approve_for_deletion(&self, id: &ResourceId) -> Result<Resource, GovernanceApiError>;

    /// `POST /resources/{id}/reject`
    async fn reject_for_deletion(
        &self,
        id: &ResourceId,
        ritm_number: &RitmNumber,
    ) -> Result<Resource, GovernanceApiError>;

    /// `POST /admin/resources/{id}/approve`
    async fn confirm_deletion(&self, id: &ResourceId) -> Result<Resource, GovernanceApiError>;

    /// `POST /admin/resources/{id}/reject`
    async fn reject_deletion(&self, id: &ResourceId) -> Result<Resource, GovernanceApiError>;

    /// `POST /auth/login`
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, GovernanceApiError>;
}
