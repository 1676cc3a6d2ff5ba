//! # bastion-cli: Command-line front-end
//!
//! Provides the `bastion` command. Every command builds a
//! [`GovernanceService`](bastion_service::GovernanceService), loads the
//! resources, and then either prints a view or performs one decision.
//!
//! ## Subcommands
//!
//! - `bastion login`: Authenticate and print the user and token.
//! - `bastion list`: Resource table with status and available actions.
//! - `bastion summary`: Dashboard counts and potential savings.
//! - `bastion approve` / `bastion keep`: Owner decisions.
//! - `bastion admin confirm` / `bastion admin reject`: Administrator decisions.
//!
//! ```bash
//! bastion --offline list --pending
//! bastion --offline keep 1 --ritm RITM123456
//! bastion --email admin@exemple.fr --password secret admin confirm 2
//! ```
//!
//! With `--offline` every invocation starts from the demo data, so
//! decisions do not persist between runs.

pub mod context;
pub mod decide;
pub mod login;
pub mod render;
pub mod resources;

pub use context::{connect, Backend, ConnectionArgs, RoleArg};
