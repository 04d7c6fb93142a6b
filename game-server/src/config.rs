use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Word list to load instead of the embedded one
    pub words_file: Option<PathBuf>,
    pub store_timeout: Duration,
    pub leaderboard_limit: u64,
    pub player_leaderboard_limit: u64,
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080)?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://word_board.db?mode=rwc".to_string()),
            words_file: env::var("WORDS_FILE").ok().map(PathBuf::from),
            store_timeout: Duration::from_millis(parse_var("STORE_TIMEOUT_MS", 5000)?),
            leaderboard_limit: parse_var("LEADERBOARD_LIMIT", 50)?,
            player_leaderboard_limit: parse_var("PLAYER_LEADERBOARD_LIMIT", 10)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "sqlite://word_board.db?mode=rwc".to_string(),
            words_file: None,
            store_timeout: Duration::from_secs(5),
            leaderboard_limit: 50,
            player_leaderboard_limit: 10,
        }
    }
}
