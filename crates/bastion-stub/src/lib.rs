//! # bastion-stub: Governance API stub server
//!
//! In-memory implementation of the governance API that `bastion-client`
//! calls, seeded with the demo fixtures. Lifecycle rules are enforced with
//! the same engine the client side uses.
//!
//! Storage is in-memory with no persistence; data is lost on restart.

pub mod error;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
