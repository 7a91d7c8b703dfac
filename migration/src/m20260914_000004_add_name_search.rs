use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DbBackend};

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260914_000004_add_name_search"
    }
}

/// Double-metaphone code of every word in a string, space separated.
const CREATE_DMETAPHONE_FUNCTION: &str = r#"
CREATE OR REPLACE FUNCTION pg_search_dmetaphone(text) RETURNS text LANGUAGE SQL IMMUTABLE STRICT AS $function$
  SELECT array_to_string(ARRAY(SELECT dmetaphone(unnest(regexp_split_to_array($1, E'\\s+')))), ' ')
$function$;
"#;

const CREATE_TRIGRAM_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS index_response_plans_on_name_trigram ON response_plans
  USING gin ((coalesce(first_name, '') || ' ' || coalesce(last_name, '')) gin_trgm_ops);
"#;

// Name search relies on PostgreSQL extensions; other backends rank in process instead.
#[async_trait::async_trait]
#[rustfmt::skip]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        let db = manager.get_connection();
        db.execute_unprepared("CREATE EXTENSION IF NOT EXISTS pg_trgm").await?;
        db.execute_unprepared("CREATE EXTENSION IF NOT EXISTS fuzzystrmatch").await?;
        db.execute_unprepared(CREATE_DMETAPHONE_FUNCTION).await?;
        db.execute_unprepared(CREATE_TRIGRAM_INDEX).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        let db = manager.get_connection();
        db.execute_unprepared("DROP INDEX IF EXISTS index_response_plans_on_name_trigram").await?;
        db.execute_unprepared("DROP FUNCTION IF EXISTS pg_search_dmetaphone(text)").await?;

        Ok(())
    }
}
