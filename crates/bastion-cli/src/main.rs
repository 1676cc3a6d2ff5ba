//! # bastion CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bastion_cli::decide::{run_decision, AdminArgs, ApproveArgs, KeepArgs};
use bastion_cli::login::run_login;
use bastion_cli::resources::{run_list, run_summary, ListArgs, SummaryArgs};
use bastion_cli::ConnectionArgs;

/// Governance of unused Azure Bastion resources.
///
/// Owners decide whether an unused bastion may be deleted; administrators
/// validate or refuse the requested deletions.
#[derive(Parser, Debug)]
#[command(name = "bastion", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Authenticate with --email and --password and print the token.
    Login,

    /// List resources with their status and the actions available to you.
    List(ListArgs),

    /// Dashboard counts and potential monthly savings.
    Summary(SummaryArgs),

    /// Request deletion of a pending resource (owner).
    Approve(ApproveArgs),

    /// Keep a pending resource, citing a RITM ticket (owner).
    Keep(KeepArgs),

    /// Validate or refuse a requested deletion (administrator).
    Admin(AdminArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let conn = &cli.connection;
    let result = match cli.command {
        Commands::Login => run_login(conn).await,
        Commands::List(args) => run_list(&args, conn).await,
        Commands::Summary(args) => run_summary(&args, conn).await,
        Commands::Approve(args) => run_decision(args.into(), conn).await,
        Commands::Keep(args) => run_decision(args.into(), conn).await,
        Commands::Admin(args) => run_decision(args.into(), conn).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
