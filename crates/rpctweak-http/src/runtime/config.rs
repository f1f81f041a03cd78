//! # Environment-Based Configuration
//!
//! Configuration loading for the simulator runtime, allowing runtime
//! configuration changes without rebuilds.
//!
//! ## Environment Variables
//!
//! - `RPCTWEAK_BIND_ADDR` - Socket address to bind (default: 127.0.0.1:8090)
//! - `RPCTWEAK_MODE` - Initial response mode 0-4 (default: 0; unrecognized
//!   values normalize to 0 rather than failing startup)
//! - `RPCTWEAK_DEV_USERNAME` - Dev credential username (default: admin)
//! - `RPCTWEAK_DEV_PASSWORD` - Dev credential password (default: password)
//! - `RPCTWEAK_ENABLE_CORS` - Enable permissive CORS (default: true)

use std::env;
use std::net::SocketAddr;

use rpctweak_core::ResponseMode;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable '{key}': {message}")]
    InvalidEnvVar { key: String, message: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// The username/password pair the simulated endpoint validates against.
/// A fixture standing in for a real authentication backend, nothing more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevCredentials {
    pub username: String,
    pub password: String,
}

impl Default for DevCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "password".to_string(),
        }
    }
}

impl DevCredentials {
    /// Compare a supplied pair against the fixture.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Simulator runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Socket address the server binds to
    pub bind_addr: SocketAddr,
    /// Response mode active at startup
    pub initial_mode: ResponseMode,
    /// Dev credential fixture for the simulated endpoint
    pub credentials: DevCredentials,
    /// Enable permissive CORS for cross-origin test clients
    pub enable_cors: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8090)),
            initial_mode: ResponseMode::Off,
            credentials: DevCredentials::default(),
            enable_cors: true,
        }
    }
}

/// Builder for [`RuntimeConfig`] with environment variable support
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfigBuilder {
    bind_addr: Option<SocketAddr>,
    initial_mode: Option<ResponseMode>,
    username: Option<String>,
    password: Option<String>,
    enable_cors: Option<bool>,
}

impl RuntimeConfigBuilder {
    /// Create a new builder with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unparsable bind address or boolean.
    /// An out-of-range or non-numeric `RPCTWEAK_MODE` is NOT an error: the
    /// simulator fails safe by treating it as mode 0 (Off).
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::default();

        if let Ok(addr) = env::var("RPCTWEAK_BIND_ADDR") {
            let addr = addr
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    key: "RPCTWEAK_BIND_ADDR".to_string(),
                    message: format!("invalid socket address '{addr}': {e}"),
                })?;
            builder = builder.bind_addr(addr);
        }
        if let Ok(raw) = env::var("RPCTWEAK_MODE") {
            let mode = match raw.trim().parse::<i64>() {
                Ok(value) => ResponseMode::from_raw(value),
                Err(_) => {
                    tracing::warn!(
                        value = %raw,
                        "RPCTWEAK_MODE is not an integer, treating as Off"
                    );
                    ResponseMode::Off
                }
            };
            builder = builder.initial_mode(mode);
        }
        if let Ok(username) = env::var("RPCTWEAK_DEV_USERNAME") {
            builder = builder.username(username);
        }
        if let Ok(password) = env::var("RPCTWEAK_DEV_PASSWORD") {
            builder = builder.password(password);
        }
        if let Some(cors) = get_env_bool("RPCTWEAK_ENABLE_CORS")? {
            builder = builder.enable_cors(cors);
        }

        Ok(builder)
    }

    /// Set the bind address
    #[must_use]
    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = Some(addr);
        self
    }

    /// Set the initial response mode
    #[must_use]
    pub fn initial_mode(mut self, mode: ResponseMode) -> Self {
        self.initial_mode = Some(mode);
        self
    }

    /// Set the dev credential username
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the dev credential password
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Enable or disable CORS
    #[must_use]
    pub fn enable_cors(mut self, enable: bool) -> Self {
        self.enable_cors = Some(enable);
        self
    }

    /// Validate configuration and build [`RuntimeConfig`]
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if the configuration is invalid.
    pub fn build(self) -> Result<RuntimeConfig, ConfigError> {
        let defaults = RuntimeConfig::default();
        let credentials = DevCredentials {
            username: self.username.unwrap_or(defaults.credentials.username),
            password: self.password.unwrap_or(defaults.credentials.password),
        };

        if credentials.username.is_empty() {
            return Err(ConfigError::ValidationError(
                "dev username cannot be empty".to_string(),
            ));
        }

        Ok(RuntimeConfig {
            bind_addr: self.bind_addr.unwrap_or(defaults.bind_addr),
            initial_mode: self.initial_mode.unwrap_or(defaults.initial_mode),
            credentials,
            enable_cors: self.enable_cors.unwrap_or(defaults.enable_cors),
        })
    }
}

fn get_env_bool(key: &str) -> Result<Option<bool>, ConfigError> {
    match env::var(key) {
        Ok(val) => match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!(
                    "invalid boolean value '{val}', expected true/false/1/0/yes/no/on/off"
                ),
            }),
        },
        Err(_) => Ok(None),
    }
}
