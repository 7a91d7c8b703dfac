use serde::Deserialize;
use std::env;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::error::Error;

pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// Resolve the acting officer to the most recently created one instead of the session.
    pub demo_mode: bool,
    pub database: DatabaseConfig,
    pub officers: OfficerConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Overridden by the `DATABASE_URL` environment variable.
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            url: None,
            max_connections: 100,
            min_connections: 5,
            connect_timeout_secs: 8,
            idle_timeout_secs: 8,
            max_lifetime_secs: 8,
            sqlx_logging: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OfficerConfig {
    /// How many analytics tokens to try before giving up on creating an officer.
    pub analytics_token_attempts: u32,
}

impl Default for OfficerConfig {
    fn default() -> Self {
        OfficerConfig {
            analytics_token_attempts: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// PostgreSQL text search configuration used for stemming.
    pub dictionary: String,
    /// Minimum trigram similarity for a fuzzy name match.
    pub trigram_threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            dictionary: "english".to_owned(),
            trigram_threshold: 0.3,
        }
    }
}

impl Config {
    /// Database URL from the environment (including `.env`), falling back to the settings file.
    pub fn database_url(&self) -> Result<String, Error> {
        dotenv::dotenv().ok();

        env::var("DATABASE_URL")
            .ok()
            .or_else(|| self.database.url.clone())
            .ok_or_else(|| Error::Config("DATABASE_URL must be set".to_owned()))
    }
}

pub fn get_config(file: &str) -> Result<Config, Error> {
    // Open the file, a missing file means defaults
    let config_file_path = Path::new(file);
    let shown = config_file_path.display();
    let mut file = match File::open(config_file_path) {
        Err(why) if why.kind() == ErrorKind::NotFound => {
            tracing::warn!("{} not found, using default settings", shown);
            return Ok(Config::default());
        }
        Err(why) => return Err(Error::Config(format!("Couldn't open {}: {}", shown, why))),
        Ok(file) => file,
    };

    // Get the file content
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|why| Error::Config(format!("Unable to read {}: {}", shown, why)))?;

    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<Config, Error> {
    toml::from_str(contents)
        .map_err(|why| Error::Config(format!("Error while parsing settings file: {}", why)))
}
