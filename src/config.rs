/*
 * Responsibility
 * - Load settings from the environment (.env is honoured via dotenvy)
 * - Validate them up front so a misconfigured process fails at startup
 * - PORT / ACCESS_TOKEN_SECRET / DB_USER / DB_PASS and friends
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TOKEN_TTL_SECONDS: u64 = 60 * 60;
const MAX_TOKEN_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<&str>) -> Self {
        match raw
            .unwrap_or("development")
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where booking and catalog documents live.
#[derive(Clone, Debug)]
pub enum StorageConfig {
    Postgres(DatabaseConfig),
    /// Process-local store; contents are lost on restart.
    Memory,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    /// Full connection URL. Takes precedence over the individual parts.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Credentials stay out of logs.
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub access_token_secret: String,
    pub access_token_ttl_seconds: u64,

    /// When set, `GET /bookings` without an `email` filter is rejected instead
    /// of listing every booking.
    pub require_owner_filter: bool,

    pub storage: StorageConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("require_owner_filter", &self.require_owner_filter)
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// `from_env` is the production entry point; tests feed a map instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
            None => DEFAULT_PORT,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let access_token_secret = lookup("ACCESS_TOKEN_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("ACCESS_TOKEN_SECRET"))?;

        let access_token_ttl_seconds = match lookup("ACCESS_TOKEN_TTL_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ttl| (1..=MAX_TOKEN_TTL_SECONDS).contains(ttl))
                .ok_or(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"))?,
            None => DEFAULT_TOKEN_TTL_SECONDS,
        };

        let require_owner_filter = match lookup("REQUIRE_OWNER_FILTER") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid("REQUIRE_OWNER_FILTER"))?,
            None => false,
        };

        let storage = match lookup("STORAGE_BACKEND")
            .unwrap_or_else(|| "postgres".to_string())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => StorageConfig::Postgres(database_from_lookup(&lookup)?),
            "memory" => StorageConfig::Memory,
            _ => return Err(ConfigError::Invalid("STORAGE_BACKEND")),
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            access_token_secret,
            access_token_ttl_seconds,
            require_owner_filter,
            storage,
        })
    }
}

fn database_from_lookup<F>(lookup: &F) -> Result<DatabaseConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());

    // Credentials are only mandatory when no full URL was given.
    let (user, password) = if url.is_some() {
        (
            lookup("DB_USER").unwrap_or_default(),
            lookup("DB_PASS").unwrap_or_default(),
        )
    } else {
        (
            lookup("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?,
            lookup("DB_PASS").ok_or(ConfigError::Missing("DB_PASS"))?,
        )
    };

    let port = match lookup("DB_PORT") {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid("DB_PORT"))?,
        None => 5432,
    };

    let max_connections = match lookup("DB_MAX_CONNECTIONS") {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::Invalid("DB_MAX_CONNECTIONS"))?,
        None => 10,
    };

    Ok(DatabaseConfig {
        url,
        host: lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
        port,
        user,
        password,
        name: lookup("DB_NAME").unwrap_or_else(|| "car_doctor".to_string()),
        max_connections,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
