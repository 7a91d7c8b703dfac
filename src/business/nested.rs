//! Child collections edited together with their response plan.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use entity::sea_orm::entity::*;
use entity::sea_orm::{ConnectionTrait, DatabaseTransaction, DbErr, QueryFilter};
use serde::Deserialize;

use entity::{alias, contact, image, response_strategy};

use super::forms::{parse_integer, present, scalar, Nested};
use super::validation::{is_blank, ValidationErrors, BLANK, NOT_A_NUMBER, TAKEN};
use crate::error::{Error, Result};

/// Fields of one kind of child record, and how to write them.
#[async_trait]
pub trait NestedFields: Send + Sync {
    /// Name used in "not found" errors.
    const ENTITY: &'static str;

    /// A new row with nothing filled in is dropped.
    fn is_blank(&self) -> bool;

    fn check(&self, _errors: &mut ValidationErrors) {}

    async fn create(&self, txn: &DatabaseTransaction, plan_id: i32, now: NaiveDateTime) -> Result<(), DbErr>;

    /// Returns `false` if the plan has no such child.
    async fn update(
        &self,
        txn: &DatabaseTransaction,
        plan_id: i32,
        id: i32,
        now: NaiveDateTime,
    ) -> Result<bool, DbErr>;

    /// Returns `false` if the plan has no such child.
    async fn destroy(&self, txn: &DatabaseTransaction, plan_id: i32, id: i32) -> Result<bool, DbErr>;
}

/// Write the submitted rows of one child collection.
pub async fn apply_nested<T: NestedFields>(
    txn: &DatabaseTransaction,
    plan_id: i32,
    rows: &[Nested<T>],
    now: NaiveDateTime,
) -> Result<()> {
    for row in rows {
        match row.id {
            Some(id) if row.destroy => {
                if !row.fields.destroy(txn, plan_id, id).await? {
                    return Err(Error::not_found(T::ENTITY, id));
                }
            }
            Some(id) => {
                if !row.fields.update(txn, plan_id, id, now).await? {
                    return Err(Error::not_found(T::ENTITY, id));
                }
            }
            None if row.destroy || row.fields.is_blank() => {}
            None => row.fields.create(txn, plan_id, now).await?,
        }
    }

    Ok(())
}

/// Replay the alias rows against the plan's stored aliases and report renames that would give
/// two aliases the same name. New rows with a taken name are merged, not reported.
pub async fn check_alias_names<C: ConnectionTrait>(
    conn: &C,
    plan_id: Option<i32>,
    rows: &[Nested<AliasFields>],
    errors: &mut ValidationErrors,
) -> Result<(), DbErr> {
    let mut names: Vec<(Option<i32>, String)> = match plan_id {
        Some(plan_id) => alias::Entity::find()
            .filter(alias::Column::ResponsePlanId.eq(plan_id))
            .all(conn)
            .await?
            .into_iter()
            .map(|alias| (Some(alias.id), alias.name))
            .collect(),
        None => Vec::new(),
    };

    for row in rows {
        let name = row.fields.name.as_deref().and_then(present);
        match (row.id, name) {
            (Some(id), _) if row.destroy => names.retain(|(existing, _)| *existing != Some(id)),
            (Some(id), Some(name)) => {
                let taken = names
                    .iter()
                    .any(|(existing, other)| *existing != Some(id) && *other == name);
                if taken {
                    errors.add("aliases.name", TAKEN);
                    continue;
                }
                if let Some(entry) = names.iter_mut().find(|(existing, _)| *existing == Some(id)) {
                    entry.1 = name;
                }
            }
            (None, Some(name)) if !row.destroy => {
                if !names.iter().any(|(_, other)| *other == name) {
                    names.push((None, name));
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Aliases are unique per plan, so an existing alias with the same name is reused.
pub async fn find_or_create_alias(
    txn: &DatabaseTransaction,
    plan_id: i32,
    name: &str,
    now: NaiveDateTime,
) -> Result<alias::Model, DbErr> {
    let existing = alias::Entity::find()
        .filter(alias::Column::ResponsePlanId.eq(plan_id))
        .filter(alias::Column::Name.eq(name))
        .one(txn)
        .await?;

    match existing {
        Some(alias) => Ok(alias),
        None => {
            alias::ActiveModel {
                response_plan_id: Set(plan_id),
                name: Set(name.to_owned()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(txn)
            .await
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AliasFields {
    pub name: Option<String>,
}

#[async_trait]
impl NestedFields for AliasFields {
    const ENTITY: &'static str = "alias";

    fn is_blank(&self) -> bool {
        is_blank(self.name.as_deref())
    }

    fn check(&self, errors: &mut ValidationErrors) {
        if self.name.is_some() && self.is_blank() {
            errors.add("aliases.name", BLANK);
        }
    }

    async fn create(&self, txn: &DatabaseTransaction, plan_id: i32, now: NaiveDateTime) -> Result<(), DbErr> {
        if let Some(name) = self.name.as_deref().and_then(present) {
            find_or_create_alias(txn, plan_id, &name, now).await?;
        }
        Ok(())
    }

    async fn update(
        &self,
        txn: &DatabaseTransaction,
        plan_id: i32,
        id: i32,
        now: NaiveDateTime,
    ) -> Result<bool, DbErr> {
        let Some(existing) = alias::Entity::find_by_id(id)
            .filter(alias::Column::ResponsePlanId.eq(plan_id))
            .one(txn)
            .await?
        else {
            return Ok(false);
        };

        let mut active_model: alias::ActiveModel = existing.into();
        if let Some(name) = self.name.as_deref().and_then(present) {
            active_model.name = Set(name);
        }
        active_model.updated_at = Set(now);
        active_model.update(txn).await?;

        Ok(true)
    }

    async fn destroy(&self, txn: &DatabaseTransaction, plan_id: i32, id: i32) -> Result<bool, DbErr> {
        let result = alias::Entity::delete_many()
            .filter(alias::Column::Id.eq(id))
            .filter(alias::Column::ResponsePlanId.eq(plan_id))
            .exec(txn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactFields {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub cell: Option<String>,
    pub organization: Option<String>,
    pub notes: Option<String>,
}

impl ContactFields {
    fn values(&self) -> [&Option<String>; 5] {
        [
            &self.name,
            &self.relationship,
            &self.cell,
            &self.organization,
            &self.notes,
        ]
    }
}

#[async_trait]
impl NestedFields for ContactFields {
    const ENTITY: &'static str = "contact";

    fn is_blank(&self) -> bool {
        self.values()
            .iter()
            .all(|value| is_blank(value.as_deref()))
    }

    async fn create(&self, txn: &DatabaseTransaction, plan_id: i32, now: NaiveDateTime) -> Result<(), DbErr> {
        let submitted = |value: &Option<String>| value.as_deref().and_then(present);

        contact::ActiveModel {
            response_plan_id: Set(plan_id),
            name: Set(submitted(&self.name)),
            relationship: Set(submitted(&self.relationship)),
            cell: Set(submitted(&self.cell)),
            organization: Set(submitted(&self.organization)),
            notes: Set(submitted(&self.notes)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        Ok(())
    }

    async fn update(
        &self,
        txn: &DatabaseTransaction,
        plan_id: i32,
        id: i32,
        now: NaiveDateTime,
    ) -> Result<bool, DbErr> {
        let Some(existing) = contact::Entity::find_by_id(id)
            .filter(contact::Column::ResponsePlanId.eq(plan_id))
            .one(txn)
            .await?
        else {
            return Ok(false);
        };

        let mut active_model: contact::ActiveModel = existing.into();
        if let Some(name) = &self.name {
            active_model.name = Set(present(name));
        }
        if let Some(relationship) = &self.relationship {
            active_model.relationship = Set(present(relationship));
        }
        if let Some(cell) = &self.cell {
            active_model.cell = Set(present(cell));
        }
        if let Some(organization) = &self.organization {
            active_model.organization = Set(present(organization));
        }
        if let Some(notes) = &self.notes {
            active_model.notes = Set(present(notes));
        }
        active_model.updated_at = Set(now);
        active_model.update(txn).await?;

        Ok(true)
    }

    async fn destroy(&self, txn: &DatabaseTransaction, plan_id: i32, id: i32) -> Result<bool, DbErr> {
        let result = contact::Entity::delete_many()
            .filter(contact::Column::Id.eq(id))
            .filter(contact::Column::ResponsePlanId.eq(plan_id))
            .exec(txn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageFields {
    pub source: Option<String>,
}

#[async_trait]
impl NestedFields for ImageFields {
    const ENTITY: &'static str = "image";

    fn is_blank(&self) -> bool {
        is_blank(self.source.as_deref())
    }

    fn check(&self, errors: &mut ValidationErrors) {
        if self.source.is_some() && self.is_blank() {
            errors.add("images.source", BLANK);
        }
    }

    async fn create(&self, txn: &DatabaseTransaction, plan_id: i32, now: NaiveDateTime) -> Result<(), DbErr> {
        if let Some(source) = self.source.as_deref().and_then(present) {
            image::ActiveModel {
                response_plan_id: Set(plan_id),
                source: Set(source),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(txn)
            .await?;
        }
        Ok(())
    }

    async fn update(
        &self,
        txn: &DatabaseTransaction,
        plan_id: i32,
        id: i32,
        now: NaiveDateTime,
    ) -> Result<bool, DbErr> {
        let Some(existing) = image::Entity::find_by_id(id)
            .filter(image::Column::ResponsePlanId.eq(plan_id))
            .one(txn)
            .await?
        else {
            return Ok(false);
        };

        let mut active_model: image::ActiveModel = existing.into();
        if let Some(source) = self.source.as_deref().and_then(present) {
            active_model.source = Set(source);
        }
        active_model.updated_at = Set(now);
        active_model.update(txn).await?;

        Ok(true)
    }

    async fn destroy(&self, txn: &DatabaseTransaction, plan_id: i32, id: i32) -> Result<bool, DbErr> {
        let result = image::Entity::delete_many()
            .filter(image::Column::Id.eq(id))
            .filter(image::Column::ResponsePlanId.eq(plan_id))
            .exec(txn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StrategyFields {
    #[serde(deserialize_with = "scalar")]
    pub priority: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl StrategyFields {
    fn priority(&self) -> Option<i32> {
        self.priority
            .as_deref()
            .and_then(|priority| parse_integer(priority).ok())
    }
}

#[async_trait]
impl NestedFields for StrategyFields {
    const ENTITY: &'static str = "response strategy";

    fn is_blank(&self) -> bool {
        is_blank(self.priority.as_deref())
            && is_blank(self.title.as_deref())
            && is_blank(self.description.as_deref())
    }

    fn check(&self, errors: &mut ValidationErrors) {
        if let Some(priority) = self.priority.as_deref() {
            if !is_blank(Some(priority)) && parse_integer(priority).is_err() {
                errors.add("response_strategies.priority", NOT_A_NUMBER);
            }
        }
    }

    async fn create(&self, txn: &DatabaseTransaction, plan_id: i32, now: NaiveDateTime) -> Result<(), DbErr> {
        response_strategy::ActiveModel {
            response_plan_id: Set(plan_id),
            priority: Set(self.priority()),
            title: Set(self.title.as_deref().and_then(present)),
            description: Set(self.description.as_deref().and_then(present)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        Ok(())
    }

    async fn update(
        &self,
        txn: &DatabaseTransaction,
        plan_id: i32,
        id: i32,
        now: NaiveDateTime,
    ) -> Result<bool, DbErr> {
        let Some(existing) = response_strategy::Entity::find_by_id(id)
            .filter(response_strategy::Column::ResponsePlanId.eq(plan_id))
            .one(txn)
            .await?
        else {
            return Ok(false);
        };

        let mut active_model: response_strategy::ActiveModel = existing.into();
        if self.priority.is_some() {
            active_model.priority = Set(self.priority());
        }
        if let Some(title) = &self.title {
            active_model.title = Set(present(title));
        }
        if let Some(description) = &self.description {
            active_model.description = Set(present(description));
        }
        active_model.updated_at = Set(now);
        active_model.update(txn).await?;

        Ok(true)
    }

    async fn destroy(&self, txn: &DatabaseTransaction, plan_id: i32, id: i32) -> Result<bool, DbErr> {
        let result = response_strategy::Entity::delete_many()
            .filter(response_strategy::Column::Id.eq(id))
            .filter(response_strategy::Column::ResponsePlanId.eq(plan_id))
            .exec(txn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
