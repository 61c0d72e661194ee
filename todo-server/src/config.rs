use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// SQLite URL (`sqlite://path`, `sqlite::memory:`)
    pub url: String,
    /// Maximum number of database connections in the pool
    pub max_connections: u32,
    /// Pool acquire timeout in seconds
    pub connection_timeout: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// IP address to bind
    pub listen_addr: String,
    /// Port number to listen on
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Stdout format (pretty, json, compact)
    pub format: LogFormat,
    /// Append-only log file; empty disables file logging
    pub file: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl Config {
    /// Load configuration from the defaults, `CONFIG_FILE` and the environment
    pub fn from_env() -> Result<Self> {
        let config_file = env::var("CONFIG_FILE").ok();
        Self::load(config_file.as_deref(), false)
    }

    /// Load configuration with a required config file layered over the defaults
    pub fn from_file(path: &str) -> Result<Self> {
        Self::load(Some(path), true)
    }

    fn load(config_file: Option<&str>, required: bool) -> Result<Self> {
        let mut result = Self::build(config_file, required, Self::env_source())?;

        // DATABASE_URL, LISTEN_ADDR, PORT, LOG_LEVEL, LOG_FILE win over TODO__*
        Self::apply_standard_env_vars(&mut result)?;

        Ok(result)
    }

    fn env_source() -> Environment {
        Environment::with_prefix("TODO")
            .separator("__")
            .try_parsing(true)
    }

    fn build(config_file: Option<&str>, required: bool, environment: Environment) -> Result<Self> {
        let mut builder =
            ConfigBuilder::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(path) = config_file {
            builder = builder.add_source(
                File::with_name(path)
                    .required(required)
                    .format(FileFormat::Toml),
            );
        }

        let config = builder
            .add_source(environment)
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Apply standard environment variables (DATABASE_URL, LISTEN_ADDR, PORT, LOG_LEVEL, LOG_FILE)
    fn apply_standard_env_vars(config: &mut Config) -> Result<()> {
        config.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(database_url) = lookup("DATABASE_URL") {
            self.database.url = database_url;
        }

        if let Some(listen_addr) = lookup("LISTEN_ADDR") {
            self.server.listen_addr = listen_addr;
        }

        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid PORT value: {port}"))?;
        }

        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.logging.level = log_level;
        }

        if let Some(log_file) = lookup("LOG_FILE") {
            self.logging.file = log_file;
        }

        Ok(())
    }

    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Get the server socket address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.listen_addr, self.server.port)
    }

    /// Log file path, `None` when file logging is disabled
    pub fn log_file(&self) -> Option<&str> {
        self.logging.log_file()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ));
            }
        }

        if !self.database.url.starts_with("sqlite:") {
            return Err(anyhow::anyhow!(
                "Only SQLite databases are supported. URL must start with 'sqlite://'. Got: {}",
                self.database.url
            ));
        }

        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        self.server_address()
            .parse::<SocketAddr>()
            .with_context(|| {
                format!(
                    "Invalid listen address: {}. Must be an IP address",
                    self.server.listen_addr
                )
            })?;

        if self.database.max_connections == 0 {
            return Err(anyhow::anyhow!(
                "Database max_connections must be greater than 0"
            ));
        }

        Ok(())
    }
}

impl LoggingConfig {
    pub fn log_file(&self) -> Option<&str> {
        let file = self.file.trim();
        (!file.is_empty()).then_some(file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://todos.db".to_string(),
                max_connections: 5,
                connection_timeout: 30,
            },
            server: ServerConfig {
                listen_addr: "0.0.0.0".to_string(),
                port: 8000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Compact,
                file: "log.txt".to_string(),
            },
        }
    }
}
