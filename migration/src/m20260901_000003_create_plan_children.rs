use entity::{alias, contact, image, response_plan, response_strategy, safety_warning};
use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260901_000003_create_plan_children"
    }
}

/// Children are owned by their plan and go away with it.
fn owned_by_plan<T, C>(name: &str, table: T, column: C) -> ForeignKeyCreateStatement
where
    T: IntoTableRef,
    C: IntoIden,
{
    ForeignKey::create()
        .name(name)
        .from(table, column)
        .to(response_plan::Entity, response_plan::Column::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .on_update(ForeignKeyAction::Cascade)
        .to_owned()
}

#[async_trait::async_trait]
#[rustfmt::skip]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(alias::Entity)
                .col(ColumnDef::new(alias::Column::Id).integer().not_null().primary_key().auto_increment())
                .col(ColumnDef::new(alias::Column::ResponsePlanId).integer().not_null())
                .col(ColumnDef::new(alias::Column::Name).string().not_null())
                .col(ColumnDef::new(alias::Column::CreatedAt).date_time().not_null())
                .col(ColumnDef::new(alias::Column::UpdatedAt).date_time().not_null())
                .foreign_key(&mut owned_by_plan("FK-alias-response_plan", alias::Entity, alias::Column::ResponsePlanId))
                .to_owned(),
        ).await?;

        manager.create_table(
            Table::create()
                .table(contact::Entity)
                .col(ColumnDef::new(contact::Column::Id).integer().not_null().primary_key().auto_increment())
                .col(ColumnDef::new(contact::Column::ResponsePlanId).integer().not_null())
                .col(ColumnDef::new(contact::Column::Name).string())
                .col(ColumnDef::new(contact::Column::Relationship).string())
                .col(ColumnDef::new(contact::Column::Cell).string())
                .col(ColumnDef::new(contact::Column::Organization).string())
                .col(ColumnDef::new(contact::Column::Notes).string())
                .col(ColumnDef::new(contact::Column::CreatedAt).date_time().not_null())
                .col(ColumnDef::new(contact::Column::UpdatedAt).date_time().not_null())
                .foreign_key(&mut owned_by_plan("FK-contact-response_plan", contact::Entity, contact::Column::ResponsePlanId))
                .to_owned(),
        ).await?;

        manager.create_table(
            Table::create()
                .table(image::Entity)
                .col(ColumnDef::new(image::Column::Id).integer().not_null().primary_key().auto_increment())
                .col(ColumnDef::new(image::Column::ResponsePlanId).integer().not_null())
                .col(ColumnDef::new(image::Column::Source).string().not_null())
                .col(ColumnDef::new(image::Column::CreatedAt).date_time().not_null())
                .col(ColumnDef::new(image::Column::UpdatedAt).date_time().not_null())
                .foreign_key(&mut owned_by_plan("FK-image-response_plan", image::Entity, image::Column::ResponsePlanId))
                .to_owned(),
        ).await?;

        manager.create_table(
            Table::create()
                .table(response_strategy::Entity)
                .col(ColumnDef::new(response_strategy::Column::Id).integer().not_null().primary_key().auto_increment())
                .col(ColumnDef::new(response_strategy::Column::ResponsePlanId).integer().not_null())
                .col(ColumnDef::new(response_strategy::Column::Priority).integer())
                .col(ColumnDef::new(response_strategy::Column::Title).string())
                .col(ColumnDef::new(response_strategy::Column::Description).text())
                .col(ColumnDef::new(response_strategy::Column::CreatedAt).date_time().not_null())
                .col(ColumnDef::new(response_strategy::Column::UpdatedAt).date_time().not_null())
                .foreign_key(&mut owned_by_plan("FK-response_strategy-response_plan", response_strategy::Entity, response_strategy::Column::ResponsePlanId))
                .to_owned(),
        ).await?;

        manager.create_table(
            Table::create()
                .table(safety_warning::Entity)
                .col(ColumnDef::new(safety_warning::Column::Id).integer().not_null().primary_key().auto_increment())
                .col(ColumnDef::new(safety_warning::Column::ResponsePlanId).integer().not_null())
                .col(ColumnDef::new(safety_warning::Column::Description).string().not_null())
                .col(ColumnDef::new(safety_warning::Column::CreatedAt).date_time().not_null())
                .col(ColumnDef::new(safety_warning::Column::UpdatedAt).date_time().not_null())
                .foreign_key(&mut owned_by_plan("FK-safety_warning-response_plan", safety_warning::Entity, safety_warning::Column::ResponsePlanId))
                .to_owned(),
        ).await?;

        manager.create_index(
            Index::create()
                .name("unique-alias-per-plan")
                .table(alias::Entity)
                .col(alias::Column::ResponsePlanId)
                .col(alias::Column::Name)
                .unique()
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("index_response_strategies_on_plan_and_priority")
                .table(response_strategy::Entity)
                .col(response_strategy::Column::ResponsePlanId)
                .col(response_strategy::Column::Priority)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("index_contacts_on_response_plan_id")
                .table(contact::Entity)
                .col(contact::Column::ResponsePlanId)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("index_images_on_response_plan_id")
                .table(image::Entity)
                .col(image::Column::ResponsePlanId)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("index_safety_warnings_on_response_plan_id")
                .table(safety_warning::Entity)
                .col(safety_warning::Column::ResponsePlanId)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(safety_warning::Entity).to_owned()).await?;
        manager.drop_table(Table::drop().table(response_strategy::Entity).to_owned()).await?;
        manager.drop_table(Table::drop().table(image::Entity).to_owned()).await?;
        manager.drop_table(Table::drop().table(contact::Entity).to_owned()).await?;
        manager.drop_table(Table::drop().table(alias::Entity).to_owned()).await?;

        Ok(())
    }
}
