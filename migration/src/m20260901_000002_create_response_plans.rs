use entity::officer;
use entity::response_plan;
use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260901_000002_create_response_plans"
    }
}

#[async_trait::async_trait]
#[rustfmt::skip]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(response_plan::Entity)
                .col(ColumnDef::new(response_plan::Column::Id).integer().not_null().primary_key().auto_increment())
                .col(ColumnDef::new(response_plan::Column::AuthorId).integer().not_null())
                .col(ColumnDef::new(response_plan::Column::ApproverId).integer())
                .col(ColumnDef::new(response_plan::Column::ApprovedAt).date_time())
                .col(ColumnDef::new(response_plan::Column::BackgroundInfo).text())
                .col(ColumnDef::new(response_plan::Column::PrivateNotes).text())
                .col(ColumnDef::new(response_plan::Column::FirstName).string())
                .col(ColumnDef::new(response_plan::Column::LastName).string())
                .col(ColumnDef::new(response_plan::Column::Sex).string_len(32))
                .col(ColumnDef::new(response_plan::Column::Race).string_len(32))
                .col(ColumnDef::new(response_plan::Column::HeightInInches).integer())
                .col(ColumnDef::new(response_plan::Column::WeightInPounds).integer())
                .col(ColumnDef::new(response_plan::Column::HairColor).string())
                .col(ColumnDef::new(response_plan::Column::EyeColor).string())
                .col(ColumnDef::new(response_plan::Column::DateOfBirth).date())
                .col(ColumnDef::new(response_plan::Column::ScarsAndMarks).string())
                .col(ColumnDef::new(response_plan::Column::LocationName).string())
                .col(ColumnDef::new(response_plan::Column::LocationAddress).string())
                .col(ColumnDef::new(response_plan::Column::CreatedAt).date_time().not_null())
                .col(ColumnDef::new(response_plan::Column::UpdatedAt).date_time().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("FK-response_plan-author")
                        .from(response_plan::Entity, response_plan::Column::AuthorId)
                        .to(officer::Entity, officer::Column::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("FK-response_plan-approver")
                        .from(response_plan::Entity, response_plan::Column::ApproverId)
                        .to(officer::Entity, officer::Column::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        manager.create_index(
            Index::create()
                .name("index_response_plans_on_author_id")
                .table(response_plan::Entity)
                .col(response_plan::Column::AuthorId)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("index_response_plans_on_approver_id")
                .table(response_plan::Entity)
                .col(response_plan::Column::ApproverId)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(
            Table::drop()
                .table(response_plan::Entity)
                .to_owned()
        ).await
    }
}
