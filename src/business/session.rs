use entity::sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};
use tracing::debug;

use entity::officer;
use entity::officer::Entity as Officer;

use crate::config::Config;
use crate::error::{Error, Result};

/// Works out which officer is acting.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionResolver {
    pub demo_mode: bool,
}

impl SessionResolver {
    pub fn from_config(config: &Config) -> Self {
        SessionResolver {
            demo_mode: config.demo_mode,
        }
    }

    /// In demo mode the most recently created officer is always signed in. Otherwise the
    /// officer stored in the session, if it still exists.
    pub async fn current_officer<C: ConnectionTrait>(
        &self,
        conn: &C,
        session_officer_id: Option<i32>,
    ) -> Result<Option<officer::Model>> {
        if self.demo_mode {
            let officer = Officer::find()
                .order_by_desc(officer::Column::Id)
                .one(conn)
                .await?;
            debug!("Demo mode, acting as {:?}", officer.as_ref().map(|o| o.id));
            return Ok(officer);
        }

        match session_officer_id {
            Some(id) => Ok(Officer::find_by_id(id).one(conn).await?),
            None => Ok(None),
        }
    }

    pub async fn require_officer<C: ConnectionTrait>(
        &self,
        conn: &C,
        session_officer_id: Option<i32>,
    ) -> Result<officer::Model> {
        self.current_officer(conn, session_officer_id)
            .await?
            .ok_or(Error::Unauthenticated)
    }
}
