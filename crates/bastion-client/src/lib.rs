//! # bastion-client: Typed client for the governance API
//!
//! The upstream governance service owns persistence of resources and
//! users. This crate is the HTTP path to it:
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET  | `/resources` | [`GovernanceApi::list_resources`] |
//! | POST | `/resources/{id}/approve` | [`GovernanceApi::approve_for_deletion`] |
//! | POST | `/resources/{id}/reject` | [`GovernanceApi::reject_for_deletion`] |
//! | POST | `/admin/resources/{id}/approve` | [`GovernanceApi::confirm_deletion`] |
//! | POST | `/admin/resources/{id}/reject` | [`GovernanceApi::reject_deletion`] |
//! | POST | `/auth/login` | [`GovernanceApi::login`] |
//!
//! Paths are relative to the configured base URL. Calls carry
//! `Authorization: Bearer <token>` when the client holds a token and go out
//! unauthenticated otherwise. Failed calls are never retried here; the
//! caller decides whether to re-issue.
//!
//! [`GovernanceApi`] is the seam the workflow service is written against,
//! so an in-memory backend can stand in for the HTTP one.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use api::GovernanceApi;
pub use client::GovernanceClient;
pub use config::{ConfigError, GovernanceApiConfig};
pub use error::GovernanceApiError;
pub use types::{ErrorBody, ErrorDetail, LoginRequest, LoginResponse, RejectForDeletionRequest};
