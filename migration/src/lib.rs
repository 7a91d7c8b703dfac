pub use sea_orm_migration::prelude::*;

mod m20260901_000001_create_officers;
mod m20260901_000002_create_response_plans;
mod m20260901_000003_create_plan_children;
mod m20260914_000004_add_name_search;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000001_create_officers::Migration),
            Box::new(m20260901_000002_create_response_plans::Migration),
            Box::new(m20260901_000003_create_plan_children::Migration),
            Box::new(m20260914_000004_add_name_search::Migration),
        ]
    }
}
