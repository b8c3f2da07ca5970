const DEFAULT_PORT: u16 = 3001;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a u16, got {0:?}")]
    InvalidPort(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    /// Notes go to PostgreSQL when set, to memory otherwise.
    pub database_url: Option<String>,
    /// Restricts CORS to a single origin; permissive when unset.
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            bind_address: non_empty("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned()),
            port,
            database_url: non_empty("DATABASE_URL"),
            cors_origin: non_empty("CORS_ORIGIN"),
        })
    }
}
