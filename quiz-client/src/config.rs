use quiz_core::{DEFAULT_MAX_LIVES, QuizRules};
use std::env;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Remote champion API; when unset the catalog is read from `catalog_path`
    pub catalog_url: Option<String>,
    pub catalog_path: String,
    /// Remote high score collection; when unset scores go to the local database
    pub leaderboard_url: Option<String>,
    pub database_url: String,
    pub max_lives: u32,
    pub http_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            catalog_url: non_empty("CATALOG_URL"),
            catalog_path: non_empty("CATALOG_PATH").unwrap_or(defaults.catalog_path),
            leaderboard_url: non_empty("LEADERBOARD_URL"),
            database_url: non_empty("DATABASE_URL").unwrap_or(defaults.database_url),
            max_lives: parse_var(&non_empty, "MAX_LIVES", defaults.max_lives)?,
            http_timeout_seconds: parse_var(
                &non_empty,
                "HTTP_TIMEOUT_SECONDS",
                defaults.http_timeout_seconds,
            )?,
        })
    }

    pub fn rules(&self) -> QuizRules {
        QuizRules::new(self.max_lives)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: None,
            catalog_path: "./data/champions.json".to_string(),
            leaderboard_url: None,
            database_url: quiz_persistence::connection::DEFAULT_DATABASE_URL.to_string(),
            max_lives: DEFAULT_MAX_LIVES,
            http_timeout_seconds: 10,
        }
    }
}
