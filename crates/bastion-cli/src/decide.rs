//! # Decision Commands
//!
//! `bastion approve`, `bastion keep`, `bastion admin confirm` and
//! `bastion admin reject`. Each command loads the resources, performs one
//! lifecycle action through the workflow service, and prints the
//! notification the service published for it.

use anyhow::Result;
use clap::{Args, Subcommand};

use bastion_core::ResourceId;
use bastion_service::{GovernanceError, GovernanceService, Notification};
use bastion_state::{LifecycleAction, Resource};

use crate::context::{connect, ConnectionArgs};
use crate::render;

/// Arguments for `bastion approve`.
#[derive(Args, Debug)]
pub struct ApproveArgs {
    /// Resource identifier.
    pub id: ResourceId,
}

/// Arguments for `bastion keep`.
#[derive(Args, Debug)]
pub struct KeepArgs {
    /// Resource identifier.
    pub id: ResourceId,

    /// RITM ticket justifying keeping the resource (e.g. RITM123456).
    #[arg(long)]
    pub ritm: String,
}

/// Arguments for `bastion admin`.
#[derive(Args, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Validate a requested deletion.
    Confirm {
        /// Resource identifier.
        id: ResourceId,
    },
    /// Refuse a requested deletion.
    Reject {
        /// Resource identifier.
        id: ResourceId,
    },
}

/// One decision on one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Approve(ResourceId),
    Keep { id: ResourceId, ritm: String },
    Confirm(ResourceId),
    Reject(ResourceId),
}

impl Decision {
    pub fn action(&self) -> LifecycleAction {
        match self {
            Self::Approve(_) => LifecycleAction::ApproveForDeletion,
            Self::Keep { .. } => LifecycleAction::RejectForDeletion,
            Self::Confirm(_) => LifecycleAction::ConfirmDeletion,
            Self::Reject(_) => LifecycleAction::RejectDeletion,
        }
    }

    pub fn resource_id(&self) -> &ResourceId {
        match self {
            Self::Approve(id) | Self::Confirm(id) | Self::Reject(id) => id,
            Self::Keep { id, .. } => id,
        }
    }
}

impl From<ApproveArgs> for Decision {
    fn from(args: ApproveArgs) -> Self {
        Self::Approve(args.id)
    }
}

impl From<KeepArgs> for Decision {
    fn from(args: KeepArgs) -> Self {
        Self::Keep {
            id: args.id,
            ritm: args.ritm,
        }
    }
}

impl From<AdminArgs> for Decision {
    fn from(args: AdminArgs) -> Self {
        match args.command {
            AdminCommand::Confirm { id } => Self::Confirm(id),
            AdminCommand::Reject { id } => Self::Reject(id),
        }
    }
}

/// Result of a decision together with the notification it produced.
#[derive(Debug)]
pub struct Outcome {
    pub result: Result<Resource, GovernanceError>,
    pub notification: Option<Notification>,
}

pub async fn execute(service: &GovernanceService, decision: &Decision) -> Outcome {
    let mut rx = service.subscribe();
    let result = match decision {
        Decision::Approve(id) => service.approve_for_deletion(id).await,
        Decision::Keep { id, ritm } => service.reject_for_deletion(id, ritm).await,
        Decision::Confirm(id) => service.confirm_deletion(id).await,
        Decision::Reject(id) => service.reject_deletion(id).await,
    };
    Outcome {
        result,
        notification: rx.try_recv().ok(),
    }
}

pub async fn run_decision(decision: Decision, conn: &ConnectionArgs) -> Result<u8> {
    let service = connect(conn).await?;
    let outcome = execute(&service, &decision).await;
    if let Some(n) = &outcome.notification {
        println!("{}", render::notification(n));
    }
    match outcome.result {
        Ok(resource) => {
            println!("{}: {}", resource.id, render::status_cell(&resource));
            Ok(0)
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!(
            "{} on resource {} failed",
            decision.action(),
            decision.resource_id()
        ))),
    }
}
