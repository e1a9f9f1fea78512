use {
    crate::domain::message::Locale,
    std::{env, net::SocketAddr, str::FromStr},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub default_locale: Locale,
    pub audit_author: String,
    pub init_audit_log: bool,
    pub demo_data: bool,
    pub run_migrations: bool,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let default_locale = match lookup("DEFAULT_LOCALE") {
            None => Locale::En,
            Some(tag) => Locale::from_tag(&tag).ok_or(ConfigError::Invalid {
                name: "DEFAULT_LOCALE",
                value: tag,
            })?,
        };

        Ok(Self {
            database_url,
            bind_addr: parsed(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?,
            db_max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS", 20)?,
            default_locale,
            audit_author: lookup("AUDIT_AUTHOR")
                .unwrap_or_else(|| "unauthenticated user".to_string()),
            init_audit_log: parsed(&lookup, "INIT_AUDIT_LOG", false)?,
            demo_data: parsed(&lookup, "DEMO_DATA", false)?,
            run_migrations: parsed(&lookup, "RUN_MIGRATIONS", true)?,
        })
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
