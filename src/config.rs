//! Configuration loading and validation.
//!
//! Non-secret settings come from an optional TOML file; connection strings
//! and credentials are always read from the process environment (loaded via
//! `dotenvy` in `main`), never from the config file.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Connection settings for the three stores, environment-only.
#[derive(Debug, Clone)]
pub struct StoresConfig {
    pub postgres_url: String,
    pub mongo_uri: String,
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
}

impl StoresConfig {
    fn from_env() -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            postgres_url: require_env("DATABASE_URL")?,
            mongo_uri: require_env("MONGO_URI")?,
            neo4j_uri: require_env("NEO4J_URI")?,
            neo4j_user: require_env("NEO4J_USER")?,
            neo4j_password: require_env("NEO4J_PASSWORD")?,
        })
    }
}

fn require_env(name: &'static str) -> std::result::Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv { name }),
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Store connection settings, filled from the environment in `load`.
    #[serde(skip, default = "StoresConfig::placeholder")]
    pub stores: StoresConfig,
    #[serde(default)]
    pub mongo: MongoConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StoresConfig {
    fn placeholder() -> Self {
        Self {
            postgres_url: String::new(),
            mongo_uri: String::new(),
            neo4j_uri: String::new(),
            neo4j_user: String::new(),
            neo4j_password: String::new(),
        }
    }
}

/// Where cart snapshots live in the document store.
#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    #[serde(default = "default_mongo_database")]
    pub database: String,
    #[serde(default = "default_cart_collection")]
    pub cart_collection: String,
}

fn default_mongo_database() -> String {
    "commerce".into()
}

fn default_cart_collection() -> String {
    "carts".into()
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            database: default_mongo_database(),
            cart_collection: default_cart_collection(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_graph_database")]
    pub database: String,
}

fn default_graph_database() -> String {
    "neo4j".into()
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            database: default_graph_database(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Row limit for the purchase-graph ranking report.
    #[serde(default = "default_top_products_limit")]
    pub top_products_limit: i64,
}

fn default_top_products_limit() -> i64 {
    10
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_products_limit: default_top_products_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load settings from `path` (optional file) and the environment.
    ///
    /// A missing config file is fine — defaults apply. Missing connection
    /// environment variables are not.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config: Self = if path.as_ref().exists() {
            let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        } else {
            toml::from_str("").map_err(ConfigError::Parse)?
        };

        config.stores = StoresConfig::from_env()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.mongo.database.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "mongo.database",
                reason: "cannot be empty".into(),
            }
            .into());
        }
        if self.mongo.cart_collection.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "mongo.cart_collection",
                reason: "cannot be empty".into(),
            }
            .into());
        }
        if self.report.top_products_limit < 1 {
            return Err(ConfigError::InvalidValue {
                field: "report.top_products_limit",
                reason: format!("must be at least 1, got {}", self.report.top_products_limit),
            }
            .into());
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.format",
                    reason: format!("expected \"pretty\" or \"json\", got \"{other}\""),
                }
                .into());
            }
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}
