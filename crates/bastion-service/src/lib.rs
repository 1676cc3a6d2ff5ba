//! # bastion-service: Governance Workflow
//!
//! Connects the lifecycle engine and resource store to the upstream
//! governance API on behalf of one authenticated session.
//!
//! ## Write path
//!
//! ```text
//! action ─▶ store lookup ─▶ plan (role, status, input) ─▶ upstream call ─▶ store commit ─▶ notification
//!             NotFound        Unauthorized / Validation    UpstreamFailure
//! ```
//!
//! Writes are confirmed, never optimistic: the local store changes only
//! after the upstream service accepted the write. A refused or failed
//! action leaves the store exactly as it was and publishes a failure
//! notification.
//!
//! ## Read path
//!
//! [`GovernanceService::refresh`] replaces the store with the upstream
//! list. When the upstream is unreachable it returns the last-known set
//! flagged with the error instead of failing.

pub mod error;
pub mod mock;
pub mod notify;
pub mod service;
pub mod session;

pub use error::GovernanceError;
pub use mock::InMemoryApi;
pub use notify::{Notification, NotificationLevel, Notifier};
pub use service::{GovernanceService, Snapshot};
pub use session::Session;
