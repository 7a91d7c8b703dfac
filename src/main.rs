mod commands;
mod global;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use response_plans::business::SessionResolver;
use response_plans::config::{self, SETTINGS_FILE};
use response_plans::db;

use crate::commands::officer::OfficerCommand;
use crate::commands::plan::PlanCommand;
use crate::global::{Data, Error};

/// Manage police response plans
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file
    #[arg(long, env = "RESPONSE_PLANS_CONFIG", default_value = SETTINGS_FILE)]
    config: String,

    /// Officer id to act as; ignored in demo mode
    #[arg(long = "as", global = true)]
    officer: Option<i32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Officer(OfficerCommand),
    #[command(subcommand)]
    Plan(PlanCommand),
    /// Search plans by name
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

async fn dispatch(ctx: &Data, command: Command) -> Result<(), Error> {
    match command {
        Command::Officer(command) => commands::officer::run(ctx, command).await,
        Command::Plan(command) => commands::plan::run(ctx, command).await,
        Command::Search { query } => commands::search::run(ctx, &query.join(" ")).await,
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("response_plans=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::get_config(&cli.config)?;

    let connection = db::establish_connection(&config).await?;
    db::migrate(&connection).await?;

    let ctx = Data {
        connection,
        session: SessionResolver::from_config(&config),
        config,
        session_officer_id: cli.officer,
    };

    if let Err(why) = dispatch(&ctx, cli.command).await {
        match why.downcast_ref::<response_plans::Error>() {
            Some(plan_error) => error!("{}", commands::helper::describe_error(plan_error)),
            None => error!("{}", why),
        }
        std::process::exit(1);
    }

    Ok(())
}
