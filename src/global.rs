use entity::sea_orm::DatabaseConnection;
use response_plans::business::SessionResolver;
use response_plans::config::Config;

/// State shared by every command.
pub struct Data {
    pub connection: DatabaseConnection,
    pub config: Config,
    pub session: SessionResolver,
    /// Officer id the command runs as, from `--as`.
    pub session_officer_id: Option<i32>,
}
pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = &'a Data;
