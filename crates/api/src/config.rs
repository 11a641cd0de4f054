use std::fmt;
use std::net::IpAddr;

use axum::http::HeaderValue;

/// Which [`AuditEventStore`](audit_trail_db::store::AuditEventStore)
/// implementation the server runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL via sqlx. The default.
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    /// Process-local, volatile storage. Events are lost on shutdown.
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Postgres { .. } => f.write_str("postgres"),
            StoreBackend::Memory => f.write_str("memory"),
        }
    }
}

/// Output format of the process-wide tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field lines. The default.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// A configuration value that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("DATABASE_URL must be set when STORE_BACKEND=postgres")]
    MissingDatabaseUrl,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Largest accepted request body in bytes (default: 16 MiB).
    pub max_body_bytes: usize,
    /// Tracing output format (default: `pretty`).
    pub log_format: LogFormat,
    /// Persistence backend and its connection settings.
    pub store_backend: StoreBackend,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `MAX_BODY_BYTES`           | `16777216`                 |
    /// | `LOG_FORMAT`               | `pretty`                   |
    /// | `STORE_BACKEND`            | `postgres`                 |
    /// | `DATABASE_URL`             | required for `postgres`    |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = parse_var("HOST", "an IP address", var("HOST", "0.0.0.0"))?;
        let port = parse_var("PORT", "a valid u16", var("PORT", "3000"))?;
        let request_timeout_secs = parse_var(
            "REQUEST_TIMEOUT_SECS",
            "a valid u64",
            var("REQUEST_TIMEOUT_SECS", "30"),
        )?;
        let max_body_bytes = parse_var(
            "MAX_BODY_BYTES",
            "a valid usize",
            var("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),
        )?;

        let log_format = match var("LOG_FORMAT", "pretty").to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    expected: "'pretty' or 'json'",
                    value: other.to_string(),
                })
            }
        };

        let cors_origins = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                let invalid = || ConfigError::Invalid {
                    name: "CORS_ORIGINS",
                    expected: "a comma-separated list of explicit origins",
                    value: origin.to_string(),
                };
                // Credentials are allowed, which rules out the wildcard.
                if origin == "*" {
                    return Err(invalid());
                }
                HeaderValue::from_str(origin).map_err(|_| invalid())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let store_backend = match var("STORE_BACKEND", "postgres").to_lowercase().as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL")
                    .filter(|url| !url.is_empty())
                    .ok_or(ConfigError::MissingDatabaseUrl)?,
                max_connections: parse_var(
                    "DATABASE_MAX_CONNECTIONS",
                    "a valid u32",
                    var("DATABASE_MAX_CONNECTIONS", "20"),
                )?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    expected: "'postgres' or 'memory'",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_body_bytes,
            log_format,
            store_backend,
        })
    }
}

const DEFAULT_MAX_BODY_BYTES: &str = "16777216";

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    expected: &'static str,
    value: String,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        })
}
