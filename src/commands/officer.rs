use clap::Subcommand;
use response_plans::business::officers;
use response_plans::business::OfficerForm;

use super::helper::describe_officer;
use crate::global::{Context, Error};

#[derive(Debug, Subcommand)]
pub enum OfficerCommand {
    /// Register a new officer
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        username: Option<String>,
    },
    /// Remove an officer and every plan they authored or approved
    Remove { id: i32 },
    /// Show an officer and their plans
    Show { id: i32 },
}

pub async fn run(ctx: Context<'_>, command: OfficerCommand) -> Result<(), Error> {
    match command {
        OfficerCommand::Add {
            name,
            unit,
            title,
            phone,
            username,
        } => {
            let form = OfficerForm {
                name,
                unit,
                title,
                phone,
                username,
            };
            let officer = officers::create_officer(&ctx.connection, &ctx.config.officers, &form).await?;
            println!("{}", describe_officer(&officer));
        }
        OfficerCommand::Remove { id } => {
            officers::delete_officer(&ctx.connection, id).await?;
            println!("Removed officer #{}", id);
        }
        OfficerCommand::Show { id } => {
            let officer = officers::find_officer(&ctx.connection, id).await?;
            let authored = officers::authored_plans(&ctx.connection, id).await?;
            let approved = officers::approved_plans(&ctx.connection, id).await?;

            println!("{}", describe_officer(&officer));
            for (label, plans) in [("authored", authored), ("approved", approved)] {
                let names = plans
                    .iter()
                    .map(|plan| format!("#{} {}", plan.id, plan.display_name()))
                    .collect::<Vec<_>>();
                println!("  {} plans: {}", label, names.len());
                for name in names {
                    println!("    {}", name);
                }
            }
        }
    }

    Ok(())
}
