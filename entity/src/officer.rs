use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "officers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub unit: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    #[sea_orm(unique)]
    pub username: Option<String>,
    /// Opaque token used to correlate analytics without exposing the officer's identity.
    #[sea_orm(unique)]
    pub analytics_token: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

// Officers are referenced twice by response plans (author and approver), so the
// relations are declared on the plan side only.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
