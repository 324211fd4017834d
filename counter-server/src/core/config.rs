use std::path::PathBuf;

use chrono_tz::Tz;

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | COUNTER_DATA_DIR | ./data | Data directory (SQLite file) |
/// | COUNTER_HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | Runtime environment |
/// | COUNTER_LOG_LEVEL | info | Log level filter |
/// | COUNTER_LOG_DIR | (unset) | Daily-rolling log file directory |
/// | COUNTER_TIMEZONE | Asia/Kolkata | Business timezone for day buckets |
/// | COUNTER_CRM_BUFFER | 256 | CRM notify channel capacity |
///
/// # Example
///
/// ```ignore
/// COUNTER_DATA_DIR=/var/lib/counter COUNTER_HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory holding the SQLite database
    pub data_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Log level filter; None falls back to the subscriber default
    pub log_level: Option<String>,
    /// Directory for daily-rolling log files; None logs to stdout only
    pub log_dir: Option<String>,
    /// Business timezone. Token numbering and "today" statistics follow
    /// this zone's calendar day, not UTC.
    pub timezone: Tz,
    /// Capacity of the CRM notify channel
    pub crm_buffer_size: usize,
}

impl Config {
    /// Load configuration from environment variables, using defaults for
    /// anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("COUNTER_DATA_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("COUNTER_HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("COUNTER_LOG_LEVEL").ok(),
            log_dir: std::env::var("COUNTER_LOG_DIR").ok(),
            timezone: std::env::var("COUNTER_TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::Asia::Kolkata),
            crm_buffer_size: std::env::var("COUNTER_CRM_BUFFER")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(256),
        }
    }

    /// Override the fields tests care about
    pub fn with_overrides(data_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.data_dir = data_dir.into();
        config.http_port = http_port;
        config
    }

    /// Path of the SQLite database file
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("counter.db")
    }

    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
