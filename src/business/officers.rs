use entity::sea_orm::entity::*;
use entity::sea_orm::{Condition, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait};
use rand::Rng;
use serde::Deserialize;
use tracing::{info, warn};

use entity::officer;
use entity::officer::Entity as Officer;
use entity::response_plan;

use super::forms::present;
use super::response_plans::delete_with_children;
use super::validation::{is_blank, ValidationErrors, BLANK, TAKEN};
use crate::config::OfficerConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OfficerForm {
    pub name: String,
    pub unit: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub username: Option<String>,
}

/// 128 random bits, hex encoded.
pub fn generate_analytics_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 16] = rng.gen();
    hex::encode(bytes)
}

pub async fn find_officer<C: ConnectionTrait>(conn: &C, id: i32) -> Result<officer::Model> {
    Officer::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| Error::not_found("officer", id))
}

pub async fn find_by_username<C: ConnectionTrait>(conn: &C, username: &str) -> Result<Option<officer::Model>> {
    Ok(Officer::find()
        .filter(officer::Column::Username.eq(username))
        .one(conn)
        .await?)
}

pub async fn create_officer<C>(conn: &C, config: &OfficerConfig, form: &OfficerForm) -> Result<officer::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    create_officer_with(conn, config, form, generate_analytics_token).await
}

/// Create an officer, drawing analytics tokens from `generate` until an unused one comes up.
pub async fn create_officer_with<C, F>(
    conn: &C,
    config: &OfficerConfig,
    form: &OfficerForm,
    mut generate: F,
) -> Result<officer::Model>
where
    C: ConnectionTrait + TransactionTrait,
    F: FnMut() -> String,
{
    let txn = conn.begin().await?;
    let username = form.username.as_deref().and_then(present);

    let mut errors = ValidationErrors::new();
    if is_blank(Some(form.name.as_str())) {
        errors.add("name", BLANK);
    }
    if let Some(username) = &username {
        if find_by_username(&txn, username).await?.is_some() {
            errors.add("username", TAKEN);
        }
    }
    errors.into_result()?;

    let mut analytics_token = None;
    for attempt in 1..=config.analytics_token_attempts {
        let candidate = generate();
        let taken = Officer::find()
            .filter(officer::Column::AnalyticsToken.eq(candidate.as_str()))
            .one(&txn)
            .await?
            .is_some();

        if !taken {
            analytics_token = Some(candidate);
            break;
        }
        warn!("Analytics token collision on attempt {}, retrying", attempt);
    }
    let analytics_token = analytics_token.ok_or(Error::TokenExhausted {
        attempts: config.analytics_token_attempts,
    })?;

    let now = chrono::Utc::now().naive_utc();
    let model = officer::ActiveModel {
        name: Set(form.name.trim().to_owned()),
        unit: Set(form.unit.as_deref().and_then(present)),
        title: Set(form.title.as_deref().and_then(present)),
        phone: Set(form.phone.as_deref().and_then(present)),
        username: Set(username),
        analytics_token: Set(analytics_token),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!("Added officer {} ({})", model.name, model.id);

    Ok(model)
}

pub async fn authored_plans<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Vec<response_plan::Model>> {
    Ok(response_plan::Entity::find()
        .filter(response_plan::Column::AuthorId.eq(id))
        .order_by_asc(response_plan::Column::Id)
        .all(conn)
        .await?)
}

pub async fn approved_plans<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Vec<response_plan::Model>> {
    Ok(response_plan::Entity::find()
        .filter(response_plan::Column::ApproverId.eq(id))
        .order_by_asc(response_plan::Column::Id)
        .all(conn)
        .await?)
}

/// Remove an officer along with every plan they authored or approved.
pub async fn delete_officer<C>(conn: &C, id: i32) -> Result<()>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let model = find_officer(&txn, id).await?;

    let plan_ids: Vec<i32> = response_plan::Entity::find()
        .filter(
            Condition::any()
                .add(response_plan::Column::AuthorId.eq(id))
                .add(response_plan::Column::ApproverId.eq(id)),
        )
        .all(&txn)
        .await?
        .into_iter()
        .map(|plan| plan.id)
        .collect();
    let removed_plans = plan_ids.len();

    delete_with_children(&txn, plan_ids).await?;
    Officer::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    info!(
        "Removed officer {} ({}) and {} response plans",
        model.name, model.id, removed_plans
    );

    Ok(())
}
