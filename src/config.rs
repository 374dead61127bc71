//! Database configuration sourced from the environment.
//!
//! Built once at process start and handed to
//! [`ItemStore::connect`](crate::services::item_store::ItemStore::connect).

use std::env;

use reqwest::Url;

use crate::error::{IngestError, Result};

const DEFAULT_PORT: u16 = 5432;

#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub dbname: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .finish()
    }
}

impl DatabaseConfig {
    /// Reads `user`, `password`, `host`, `port`, `dbname` (or their
    /// `DB_*` upper-case forms). Call `dotenvy::dotenv()` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |lower: &str, upper: &str| -> Option<String> {
            lookup(lower)
                .or_else(|| lookup(upper))
                .filter(|v| !v.trim().is_empty())
        };
        let require = |lower: &str, upper: &str| -> Result<String> {
            get(lower, upper)
                .ok_or_else(|| IngestError::Config(format!("{} (or {}) must be set", lower, upper)))
        };

        let port = match get("port", "DB_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| IngestError::Config(format!("invalid port '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            user: require("user", "DB_USER")?,
            password: require("password", "DB_PASSWORD")?,
            host: require("host", "DB_HOST")?,
            port,
            dbname: require("dbname", "DB_NAME")?,
        })
    }

    /// Postgres URL with user and password percent-encoded.
    pub fn connection_url(&self) -> Result<String> {
        let invalid = |what: &str| IngestError::Config(format!("invalid {}", what));

        let mut url = Url::parse("postgres://localhost").map_err(|_| invalid("url"))?;
        url.set_host(Some(&self.host)).map_err(|_| invalid("host"))?;
        url.set_port(Some(self.port)).map_err(|_| invalid("port"))?;
        url.set_username(&self.user).map_err(|_| invalid("user"))?;
        url.set_password(Some(&self.password))
            .map_err(|_| invalid("password"))?;
        url.set_path(&self.dbname);

        Ok(url.to_string())
    }
}
