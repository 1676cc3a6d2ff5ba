//! Route definitions for the governance API stub.
//!
//! Responses deserialize cleanly into `bastion-client` types (camelCase
//! JSON, snake_case statuses).
//!
//! Callers presenting a bearer token act with their user's role; a token
//! the stub never issued is refused with 401. Callers without a token are
//! served in mock mode: the owner endpoints act as `user`, the `/admin`
//! endpoints as `admin`.

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use bastion_client::{LoginRequest, LoginResponse};
use bastion_core::{ResourceId, Role};
use bastion_state::{LifecycleAction, Resource, TransitionInput};
use bastion_store::fixtures;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the complete router, with the API mounted under `prefix`
/// (e.g. `/api`; empty or `/` mounts at the root).
pub fn router(state: AppState, prefix: &str) -> Router {
    let api = Router::new()
        .route("/resources", get(list_resources))
        .route("/resources/{id}/approve", post(approve_for_deletion))
        .route("/resources/{id}/reject", post(reject_for_deletion))
        .route("/admin/resources/{id}/approve", post(confirm_deletion))
        .route("/admin/resources/{id}/reject", post(reject_deletion))
        .route("/auth/login", post(login));

    let prefix = prefix.trim_matches('/');
    let app = Router::new().route("/health", get(health));
    let app = if prefix.is_empty() {
        app.merge(api)
    } else {
        app.nest(&format!("/{prefix}"), api)
    };

    app.fallback(not_implemented).with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────

async fn health() -> StatusCode {
    StatusCode::OK
}

// ── Caller identity ─────────────────────────────────────────────────

/// The role the caller acts with: its user's role when a bearer token is
/// presented, `unauthenticated` otherwise.
fn caller_role(state: &AppState, headers: &HeaderMap, unauthenticated: Role) -> Result<Role, ApiError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(unauthenticated);
    };
    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("malformed authorization header".into()))?;
    state
        .user_for_token(token.trim())
        .map(|u| u.role)
        .ok_or_else(|| ApiError::Unauthorized("unknown token".into()))
}

fn resource_id(raw: String) -> Result<ResourceId, ApiError> {
    ResourceId::new(raw).map_err(|e| ApiError::Validation(e.to_string()))
}

fn transition(
    state: &AppState,
    raw_id: String,
    action: LifecycleAction,
    role: Role,
    input: TransitionInput,
) -> Result<Json<Resource>, ApiError> {
    let id = resource_id(raw_id)?;
    let updated = state.store().apply_transition(&id, action, role, &input)?;
    Ok(Json(updated))
}

// ── Resources ───────────────────────────────────────────────────────

async fn list_resources(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Resource>>, ApiError> {
    caller_role(&state, &headers, Role::User)?;
    Ok(Json(state.store().list()))
}

async fn approve_for_deletion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    let role = caller_role(&state, &headers, Role::User)?;
    transition(&state, id, LifecycleAction::ApproveForDeletion, role, TransitionInput::none())
}

/// Body of the reject endpoint. The RITM number is taken raw so that a
/// malformed one is refused by the lifecycle engine (422) rather than by
/// JSON extraction.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RejectBody {
    #[serde(default)]
    ritm_number: Option<String>,
}

async fn reject_for_deletion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<RejectBody>,
) -> Result<Json<Resource>, ApiError> {
    let role = caller_role(&state, &headers, Role::User)?;
    let input = TransitionInput {
        ritm_number: body.ritm_number,
    };
    transition(&state, id, LifecycleAction::RejectForDeletion, role, input)
}

// ── Administration ──────────────────────────────────────────────────

async fn confirm_deletion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    let role = caller_role(&state, &headers, Role::Admin)?;
    transition(&state, id, LifecycleAction::ConfirmDeletion, role, TransitionInput::none())
}

async fn reject_deletion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    let role = caller_role(&state, &headers, Role::Admin)?;
    transition(&state, id, LifecycleAction::RejectDeletion, role, TransitionInput::none())
}

// ── Authentication ──────────────────────────────────────────────────

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = fixtures::find_user_by_email(state.users(), &req.email)
        .filter(|_| !req.password.is_empty())
        .cloned()
        .ok_or_else(|| ApiError::Unauthorized("invalid credentials".into()))?;
    let token = state.issue_token(&user);
    tracing::info!(user_id = %user.id, role = %user.role, "login");
    Ok(Json(LoginResponse { user, token }))
}

// ── Fallback ────────────────────────────────────────────────────────

async fn not_implemented() -> Response {
    ApiError::NotImplemented("endpoint not implemented in stub".into()).into_response()
}
