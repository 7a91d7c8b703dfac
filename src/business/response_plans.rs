use chrono::NaiveDateTime;
use entity::sea_orm::entity::*;
use entity::sea_orm::sea_query::NullOrdering;
use entity::sea_orm::{
    ConnectionTrait, DatabaseTransaction, DbErr, Order, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::info;

use entity::{alias, contact, image, response_plan, response_strategy, safety_warning};

use super::forms::PlanForm;
use super::nested::{apply_nested, check_alias_names, find_or_create_alias};
use super::officers;
use super::validation::{is_blank, validate_plan, ValidationErrors, BLANK};
use crate::error::{Error, Result};

/// A response plan together with everything it owns.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponsePlan {
    pub plan: response_plan::Model,
    /// In insertion order.
    pub aliases: Vec<alias::Model>,
    pub contacts: Vec<contact::Model>,
    /// In creation order; the first one is the profile image.
    pub images: Vec<image::Model>,
    /// By ascending priority, strategies without one last.
    pub response_strategies: Vec<response_strategy::Model>,
    pub safety_warnings: Vec<safety_warning::Model>,
}

impl ResponsePlan {
    pub fn id(&self) -> i32 {
        self.plan.id
    }

    pub fn alias_list(&self) -> Vec<String> {
        self.aliases.iter().map(|alias| alias.name.clone()).collect()
    }

    pub fn profile_image_url(&self) -> &str {
        image::profile_image_url(&self.images)
    }

    pub fn is_approved(&self) -> bool {
        self.plan.is_approved()
    }
}

fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

fn to_active_model(plan: &response_plan::Model) -> response_plan::ActiveModel {
    response_plan::ActiveModel {
        id: NotSet,
        author_id: Set(plan.author_id),
        approver_id: Set(plan.approver_id),
        approved_at: Set(plan.approved_at),
        background_info: Set(plan.background_info.clone()),
        private_notes: Set(plan.private_notes.clone()),
        first_name: Set(plan.first_name.clone()),
        last_name: Set(plan.last_name.clone()),
        sex: Set(plan.sex),
        race: Set(plan.race),
        height_in_inches: Set(plan.height_in_inches),
        weight_in_pounds: Set(plan.weight_in_pounds),
        hair_color: Set(plan.hair_color.clone()),
        eye_color: Set(plan.eye_color.clone()),
        date_of_birth: Set(plan.date_of_birth),
        scars_and_marks: Set(plan.scars_and_marks.clone()),
        location_name: Set(plan.location_name.clone()),
        location_address: Set(plan.location_address.clone()),
        created_at: Set(plan.created_at),
        updated_at: Set(plan.updated_at),
    }
}

/// Validate and write the plan row of an existing plan.
async fn save_plan(txn: &DatabaseTransaction, plan: &response_plan::Model) -> Result<response_plan::Model> {
    let mut errors = ValidationErrors::new();
    validate_plan(plan, &mut errors);
    errors.into_result()?;

    let mut active_model = to_active_model(plan);
    active_model.id = Unchanged(plan.id);
    Ok(active_model.update(txn).await?)
}

async fn find_model<C: ConnectionTrait>(conn: &C, id: i32) -> Result<response_plan::Model> {
    response_plan::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| Error::not_found("response plan", id))
}

/// Load the children of a plan.
pub async fn load<C: ConnectionTrait>(conn: &C, plan: response_plan::Model) -> Result<ResponsePlan> {
    let aliases = plan
        .find_related(alias::Entity)
        .order_by_asc(alias::Column::Id)
        .all(conn)
        .await?;
    let contacts = plan
        .find_related(contact::Entity)
        .order_by_asc(contact::Column::Id)
        .all(conn)
        .await?;
    let images = plan
        .find_related(image::Entity)
        .order_by_asc(image::Column::CreatedAt)
        .order_by_asc(image::Column::Id)
        .all(conn)
        .await?;
    let mut response_strategies = plan.find_related(response_strategy::Entity);
    QueryOrder::query(&mut response_strategies).order_by_with_nulls(
        response_strategy::Column::Priority,
        Order::Asc,
        NullOrdering::Last,
    );
    let response_strategies = response_strategies
        .order_by_asc(response_strategy::Column::Id)
        .all(conn)
        .await?;
    let safety_warnings = plan
        .find_related(safety_warning::Entity)
        .order_by_asc(safety_warning::Column::Id)
        .all(conn)
        .await?;

    Ok(ResponsePlan {
        plan,
        aliases,
        contacts,
        images,
        response_strategies,
        safety_warnings,
    })
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> Result<ResponsePlan> {
    let plan = find_model(conn, id).await?;
    load(conn, plan).await
}

/// Like [`find`], but a plan that isn't currently approved is reported as not found.
pub async fn find_approved<C: ConnectionTrait>(conn: &C, id: i32) -> Result<ResponsePlan> {
    let plan = find_model(conn, id).await?;
    if !plan.is_approved() {
        return Err(Error::not_found("response plan", id));
    }
    load(conn, plan).await
}

/// Write the child collections submitted with a plan.
async fn save_children(
    txn: &DatabaseTransaction,
    plan_id: i32,
    form: &PlanForm,
    now: NaiveDateTime,
) -> Result<()> {
    apply_nested(txn, plan_id, &form.aliases, now).await?;
    apply_nested(txn, plan_id, &form.contacts, now).await?;
    apply_nested(txn, plan_id, &form.images, now).await?;
    apply_nested(txn, plan_id, &form.response_strategies, now).await?;

    if let Some(names) = &form.alias_list {
        replace_aliases(txn, plan_id, names, now).await?;
    }

    Ok(())
}

pub async fn create<C>(conn: &C, author_id: i32, form: &PlanForm) -> Result<ResponsePlan>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let author = officers::find_officer(&txn, author_id).await?;

    let now = now();
    let mut plan = response_plan::Model::draft(author.id, now);

    // Collect every problem before touching the database
    let mut errors = ValidationErrors::new();
    form.apply(&mut plan, &mut errors);
    validate_plan(&plan, &mut errors);
    form.check_children(&mut errors);
    check_alias_names(&txn, None, &form.aliases, &mut errors).await?;
    errors.into_result()?;

    let plan = to_active_model(&plan).insert(&txn).await?;
    save_children(&txn, plan.id, form, now).await?;

    txn.commit().await?;
    info!(
        "Officer {} created response plan {} for {}",
        author.id,
        plan.id,
        plan.display_name()
    );

    load(conn, plan).await
}

/// Apply a form to an existing plan. The plan's `updated_at` only moves when one of its own
/// columns changes.
pub async fn update<C>(conn: &C, id: i32, form: &PlanForm) -> Result<ResponsePlan>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let existing = find_model(&txn, id).await?;

    let now = now();
    let mut plan = existing.clone();

    let mut errors = ValidationErrors::new();
    form.apply(&mut plan, &mut errors);
    validate_plan(&plan, &mut errors);
    form.check_children(&mut errors);
    check_alias_names(&txn, Some(id), &form.aliases, &mut errors).await?;
    errors.into_result()?;

    let plan = match plan != existing {
        true => {
            plan.updated_at = now;
            save_plan(&txn, &plan).await?
        }
        false => existing,
    };
    save_children(&txn, plan.id, form, now).await?;

    txn.commit().await?;
    info!("Updated response plan {}", plan.id);

    load(conn, plan).await
}

/// Record `approver_id` as the approver of a plan, stamping the approval time.
pub async fn approve<C>(conn: &C, id: i32, approver_id: i32) -> Result<ResponsePlan>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let approver = officers::find_officer(&txn, approver_id).await?;
    let mut plan = find_model(&txn, id).await?;

    plan.assign_approver(Some(approver.id));
    plan.updated_at = now();
    let plan = save_plan(&txn, &plan).await?;

    txn.commit().await?;
    info!("Officer {} approved response plan {}", approver.id, plan.id);

    load(conn, plan).await
}

pub async fn revoke_approval<C>(conn: &C, id: i32) -> Result<ResponsePlan>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let mut plan = find_model(&txn, id).await?;

    plan.assign_approver(None);
    plan.updated_at = now();
    let plan = save_plan(&txn, &plan).await?;

    txn.commit().await?;
    info!("Revoked approval of response plan {}", plan.id);

    load(conn, plan).await
}

pub async fn delete<C>(conn: &C, id: i32) -> Result<()>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    find_model(&txn, id).await?;
    delete_with_children(&txn, vec![id]).await?;
    txn.commit().await?;

    info!("Deleted response plan {}", id);
    Ok(())
}

/// Delete plans and everything they own.
pub(crate) async fn delete_with_children<C: ConnectionTrait>(conn: &C, ids: Vec<i32>) -> Result<(), DbErr> {
    if ids.is_empty() {
        return Ok(());
    }

    alias::Entity::delete_many()
        .filter(alias::Column::ResponsePlanId.is_in(ids.clone()))
        .exec(conn)
        .await?;
    contact::Entity::delete_many()
        .filter(contact::Column::ResponsePlanId.is_in(ids.clone()))
        .exec(conn)
        .await?;
    image::Entity::delete_many()
        .filter(image::Column::ResponsePlanId.is_in(ids.clone()))
        .exec(conn)
        .await?;
    response_strategy::Entity::delete_many()
        .filter(response_strategy::Column::ResponsePlanId.is_in(ids.clone()))
        .exec(conn)
        .await?;
    safety_warning::Entity::delete_many()
        .filter(safety_warning::Column::ResponsePlanId.is_in(ids.clone()))
        .exec(conn)
        .await?;
    response_plan::Entity::delete_many()
        .filter(response_plan::Column::Id.is_in(ids))
        .exec(conn)
        .await?;

    Ok(())
}

/// Make the plan's aliases exactly `names`, reusing aliases that already exist.
async fn replace_aliases(
    txn: &DatabaseTransaction,
    plan_id: i32,
    names: &[String],
    now: NaiveDateTime,
) -> Result<()> {
    let mut kept: Vec<i32> = Vec::with_capacity(names.len());
    for name in names.iter().filter(|name| !is_blank(Some(name.as_str()))) {
        let alias = find_or_create_alias(txn, plan_id, name, now).await?;
        if !kept.contains(&alias.id) {
            kept.push(alias.id);
        }
    }

    alias::Entity::delete_many()
        .filter(alias::Column::ResponsePlanId.eq(plan_id))
        .filter(alias::Column::Id.is_not_in(kept))
        .exec(txn)
        .await?;

    Ok(())
}

pub async fn set_alias_list<C>(conn: &C, id: i32, names: &[String]) -> Result<Vec<String>>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    find_model(&txn, id).await?;
    replace_aliases(&txn, id, names, now()).await?;
    txn.commit().await?;

    alias_list(conn, id).await
}

pub async fn alias_list<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Vec<String>> {
    let plan = find_model(conn, id).await?;
    let aliases = plan
        .find_related(alias::Entity)
        .order_by_asc(alias::Column::Id)
        .all(conn)
        .await?;

    Ok(aliases.into_iter().map(|alias| alias.name).collect())
}

pub async fn add_safety_warning<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    description: &str,
) -> Result<safety_warning::Model> {
    let plan = find_model(conn, id).await?;

    if is_blank(Some(description)) {
        let mut errors = ValidationErrors::new();
        errors.add("description", BLANK);
        return Err(errors.into());
    }

    let now = now();
    let warning = safety_warning::ActiveModel {
        response_plan_id: Set(plan.id),
        description: Set(description.to_owned()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    info!("Added safety warning {} to response plan {}", warning.id, plan.id);
    Ok(warning)
}

pub async fn remove_safety_warning<C: ConnectionTrait>(conn: &C, id: i32, warning_id: i32) -> Result<()> {
    let result = safety_warning::Entity::delete_many()
        .filter(safety_warning::Column::Id.eq(warning_id))
        .filter(safety_warning::Column::ResponsePlanId.eq(id))
        .exec(conn)
        .await?;

    match result.rows_affected {
        0 => Err(Error::not_found("safety warning", warning_id)),
        _ => Ok(()),
    }
}
