use std::path::{Path, PathBuf};

use clap::Subcommand;
use response_plans::business::response_plans as plans;
use response_plans::business::PlanForm;

use super::helper::describe_plan;
use crate::global::{Context, Error};

#[derive(Debug, Subcommand)]
pub enum PlanCommand {
    /// Create a plan from a JSON form, authored by the signed in officer
    Create { form: PathBuf },
    /// Apply a JSON form to an existing plan
    Update { id: i32, form: PathBuf },
    /// Show a plan
    Show {
        id: i32,
        /// Treat unapproved plans as missing
        #[arg(long)]
        approved: bool,
    },
    /// Approve a plan as the signed in officer
    Approve { id: i32 },
    /// Revoke a plan's approval
    Revoke { id: i32 },
    /// Delete a plan and everything it owns
    Delete { id: i32 },
    /// Show or replace a plan's aliases
    Aliases {
        id: i32,
        /// Comma separated list replacing the current aliases
        #[arg(long, value_delimiter = ',')]
        set: Option<Vec<String>>,
    },
    /// Add a safety warning to a plan
    Warn { id: i32, description: String },
    /// Remove a safety warning from a plan
    Unwarn { id: i32, warning_id: i32 },
}

fn read_form(path: &Path) -> Result<PlanForm, Error> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub async fn run(ctx: Context<'_>, command: PlanCommand) -> Result<(), Error> {
    let conn = &ctx.connection;

    match command {
        PlanCommand::Create { form } => {
            let form = read_form(&form)?;
            let author = ctx.session.require_officer(conn, ctx.session_officer_id).await?;
            let plan = plans::create(conn, author.id, &form).await?;
            println!("{}", describe_plan(&plan));
        }
        PlanCommand::Update { id, form } => {
            let form = read_form(&form)?;
            let plan = plans::update(conn, id, &form).await?;
            println!("{}", describe_plan(&plan));
        }
        PlanCommand::Show { id, approved } => {
            let plan = match approved {
                true => plans::find_approved(conn, id).await?,
                false => plans::find(conn, id).await?,
            };
            println!("{}", describe_plan(&plan));
        }
        PlanCommand::Approve { id } => {
            let approver = ctx.session.require_officer(conn, ctx.session_officer_id).await?;
            let plan = plans::approve(conn, id, approver.id).await?;
            println!("{}", describe_plan(&plan));
        }
        PlanCommand::Revoke { id } => {
            let plan = plans::revoke_approval(conn, id).await?;
            println!("{}", describe_plan(&plan));
        }
        PlanCommand::Delete { id } => {
            plans::delete(conn, id).await?;
            println!("Deleted response plan #{}", id);
        }
        PlanCommand::Aliases { id, set } => {
            let aliases = match set {
                Some(names) => plans::set_alias_list(conn, id, &names).await?,
                None => plans::alias_list(conn, id).await?,
            };
            println!("{}", aliases.join(", "));
        }
        PlanCommand::Warn { id, description } => {
            let warning = plans::add_safety_warning(conn, id, &description).await?;
            println!("Added safety warning #{}", warning.id);
        }
        PlanCommand::Unwarn { id, warning_id } => {
            plans::remove_safety_warning(conn, id, warning_id).await?;
            println!("Removed safety warning #{}", warning_id);
        }
    }

    Ok(())
}
