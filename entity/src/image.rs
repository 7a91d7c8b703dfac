use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shown for plans that have no uploaded image.
pub const DEFAULT_PROFILE_IMAGE: &str = "/assets/default_image.png";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub response_plan_id: i32,
    /// Reference resolved by the asset store.
    pub source: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::response_plan::Entity",
        from = "Column::ResponsePlanId",
        to = "super::response_plan::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    ResponsePlan,
}

impl Related<super::response_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResponsePlan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// The first image of a plan is its profile image. `images` must be in creation order.
pub fn profile_image_url(images: &[Model]) -> &str {
    images
        .first()
        .map(|image| image.source.as_str())
        .unwrap_or(DEFAULT_PROFILE_IMAGE)
}
