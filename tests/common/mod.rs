#![allow(dead_code)]

use entity::officer;
use entity::sea_orm::{ConnectOptions, Database, DatabaseConnection};
use migration::{Migrator, MigratorTrait};
use response_plans::business::forms::PlanForm;
use response_plans::business::officers::{self, OfficerForm};
use response_plans::config::OfficerConfig;

/// A migrated in-memory database. Every query shares the one connection.
pub async fn setup() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let connection = Database::connect(opt).await.unwrap();
    Migrator::up(&connection, None).await.unwrap();
    connection
}

pub async fn officer(conn: &DatabaseConnection, name: &str) -> officer::Model {
    let form = OfficerForm {
        name: name.to_owned(),
        ..Default::default()
    };
    officers::create_officer(conn, &OfficerConfig::default(), &form)
        .await
        .unwrap()
}

pub fn form(value: serde_json::Value) -> PlanForm {
    serde_json::from_value(value).unwrap()
}

/// The least a plan needs to be valid.
pub fn john_doe() -> PlanForm {
    form(serde_json::json!({
        "first_name": "John",
        "last_name": "Doe",
        "date_of_birth": "01-30-1980",
    }))
}
