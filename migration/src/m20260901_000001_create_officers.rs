use entity::officer;
use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260901_000001_create_officers"
    }
}

#[async_trait::async_trait]
#[rustfmt::skip]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(officer::Entity)
                .col(ColumnDef::new(officer::Column::Id).integer().not_null().primary_key().auto_increment())
                .col(ColumnDef::new(officer::Column::Name).string().not_null())
                .col(ColumnDef::new(officer::Column::Unit).string())
                .col(ColumnDef::new(officer::Column::Title).string())
                .col(ColumnDef::new(officer::Column::Phone).string())
                .col(ColumnDef::new(officer::Column::Username).string())
                .col(ColumnDef::new(officer::Column::AnalyticsToken).string().not_null())
                .col(ColumnDef::new(officer::Column::CreatedAt).date_time().not_null())
                .col(ColumnDef::new(officer::Column::UpdatedAt).date_time().not_null())
                .to_owned(),
        ).await?;

        manager.create_index(
            Index::create()
                .name("index_officers_on_username")
                .table(officer::Entity)
                .col(officer::Column::Username)
                .unique()
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("index_officers_on_analytics_token")
                .table(officer::Entity)
                .col(officer::Column::AnalyticsToken)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(
            Table::drop()
                .table(officer::Entity)
                .to_owned()
        ).await
    }
}
