use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "aliases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub response_plan_id: i32,
    pub name: String,
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
