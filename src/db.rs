use entity::sea_orm::ConnectOptions;
use entity::sea_orm::Database;
use entity::sea_orm::DatabaseConnection;
use migration::{Migrator, MigratorTrait};
use std::time::Duration;

use crate::config::Config;
use crate::error::Error;

pub async fn establish_connection(config: &Config) -> Result<DatabaseConnection, Error> {
    let database_url = config.database_url()?;
    let settings = &config.database;

    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(settings.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(settings.max_lifetime_secs))
        .sqlx_logging(settings.sqlx_logging);

    let connection = Database::connect(opt).await?;
    tracing::debug!("Connected to the database");

    Ok(connection)
}

/// Bring the schema up to date.
pub async fn migrate(connection: &DatabaseConnection) -> Result<(), Error> {
    Migrator::up(connection, None).await?;
    Ok(())
}
