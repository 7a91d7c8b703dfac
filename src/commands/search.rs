use response_plans::business::search;

use crate::global::{Context, Error};

/// Print every plan whose name matches `query`, best match first
pub async fn run(ctx: Context<'_>, query: &str) -> Result<(), Error> {
    let plans = search::search(&ctx.connection, &ctx.config.search, query).await?;

    if plans.is_empty() {
        println!("No response plans match `{}`", query);
        return Ok(());
    }

    for plan in plans {
        println!(
            "#{} {}  {}",
            plan.id,
            plan.display_name(),
            plan.shorthand_description()
        );
    }

    Ok(())
}
