//! # Resource Views
//!
//! `bastion list` and `bastion summary`.

use anyhow::Result;
use clap::Args;

use bastion_service::GovernanceService;
use bastion_state::Resource;
use bastion_store::aggregates;

use crate::context::{connect, ConnectionArgs};
use crate::render;

/// Arguments for `bastion list`.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only resources still waiting for the owner.
    #[arg(long, conflicts_with = "history")]
    pub pending: bool,

    /// Only resources the owner already decided on.
    #[arg(long)]
    pub history: bool,

    /// Case-insensitive filter on name, resource group, region and RITM.
    #[arg(long)]
    pub search: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `bastion summary`.
#[derive(Args, Debug, Default)]
pub struct SummaryArgs {
    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// The resources `args` selects, in store order.
pub fn select(service: &GovernanceService, args: &ListArgs) -> Vec<Resource> {
    let base = if args.pending {
        service.pending_queue()
    } else if args.history {
        service.history_view()
    } else {
        service.resources()
    };
    match &args.search {
        Some(query) => aggregates::search(query, &base),
        None => base,
    }
}

pub async fn run_list(args: &ListArgs, conn: &ConnectionArgs) -> Result<u8> {
    let service = connect(conn).await?;
    let rows = select(&service, args);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render::resource_table(&rows, service.role()));
    }
    Ok(0)
}

pub async fn run_summary(args: &SummaryArgs, conn: &ConnectionArgs) -> Result<u8> {
    let service = connect(conn).await?;
    let summary = service.summary();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render::summary(&summary));
    }
    Ok(0)
}
