//! Local terminal configuration.
//!
//! Stored as a TOML file with one table per concern:
//!
//! ```toml
//! [server]
//! host = "10.0.1.39"
//! port = 1433
//! database = "Datapark"
//! username = "pos"
//! password = ""
//!
//! [device]
//! id = "POS-1A2B3C4D"
//! name = "Caseta norte"
//! role = "MIXTO"
//! numeric_id = 0
//!
//! [storage]
//! database_path = "parkgate.db"
//! max_connections = 5
//!
//! [gate]
//! entry_raise_secs = 5
//! exit_raise_secs = 5
//! exit_return_delay_secs = 3
//! ```
//!
//! Every table and field has a default, so a partial file is valid. A missing
//! file yields the defaults with a freshly generated device id.

use crate::constants::{
    DEFAULT_DATABASE_NAME, DEFAULT_DATABASE_PATH, DEFAULT_DATABASE_USER, DEFAULT_ENTRY_GATE_SECS,
    DEFAULT_EXIT_GATE_SECS, DEFAULT_EXIT_RETURN_DELAY_SECS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT,
};
use crate::error::{Error, Result};
use crate::types::{DeviceId, DeviceRole};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub device: DeviceConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub gate: GateConfig,
}

impl AppConfig {
    /// Load the configuration at `path`.
    ///
    /// A missing file is not an error: defaults are returned and nothing is
    /// written. Use [`AppConfig::load_or_create`] to persist them.
    ///
    /// # Errors
    /// Returns `Error::Io` if the file exists but cannot be read,
    /// `Error::Config` if it is not valid TOML and `Error::InvalidConfig` if a
    /// field fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;

        debug!(path = %path.display(), device = %config.device.id, "config loaded");
        Ok(config)
    }

    /// Load the configuration, writing the defaults out when the file is missing.
    ///
    /// The device id is generated once and must survive restarts, so the
    /// first start persists it.
    ///
    /// # Errors
    /// Same as [`AppConfig::load`] and [`AppConfig::save`].
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let existed = path.exists();
        let config = Self::load(path)?;

        if !existed {
            config.save(path)?;
            info!(path = %path.display(), device = %config.device.id, "created default config");
        }

        Ok(config)
    }

    /// Validate and write the configuration to `path`, creating parent
    /// directories as needed.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` if validation fails, `Error::Config` if
    /// serialization fails and `Error::Io` on write failure.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.validate()?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;

        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Validate every section.
    ///
    /// # Errors
    /// Returns the first `Error::InvalidConfig` found.
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.device.validate()?;
        self.storage.validate()
    }
}

/// Remote database server connection settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            database: DEFAULT_DATABASE_NAME.to_string(),
            username: DEFAULT_DATABASE_USER.to_string(),
            password: String::new(),
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ServerConfig {
    /// Build a server configuration from raw form input.
    ///
    /// Text fields are trimmed; the port is parsed from text so that an
    /// out-of-range value is reported as such instead of as a parse failure.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` naming the first offending field.
    pub fn from_input(
        host: &str,
        port: &str,
        database: &str,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        let port = port.trim();
        if port.is_empty() {
            return Err(invalid("server.port", "must not be empty"));
        }
        let port = port
            .parse::<u32>()
            .ok()
            .filter(|p| (1..=u32::from(u16::MAX)).contains(p))
            .and_then(|p| u16::try_from(p).ok())
            .ok_or_else(|| invalid("server.port", "must be between 1 and 65535"))?;

        let config = Self {
            host: host.trim().to_string(),
            port,
            database: database.trim().to_string(),
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `Error::InvalidConfig` for an empty or non-IPv4 host, port 0,
    /// or an empty database name or username.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(invalid("server.host", "must not be empty"));
        }
        if Ipv4Addr::from_str(self.host.trim()).is_err() {
            return Err(invalid(
                "server.host",
                format!("'{}' is not a dotted-quad IPv4 address", self.host),
            ));
        }
        if self.port == 0 {
            return Err(invalid("server.port", "must be between 1 and 65535"));
        }
        if self.database.trim().is_empty() {
            return Err(invalid("server.database", "must not be empty"));
        }
        if self.username.trim().is_empty() {
            return Err(invalid("server.username", "must not be empty"));
        }
        Ok(())
    }

    /// `host:port/database`, safe to log.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}

/// Identity and role of this terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub id: DeviceId,
    pub name: String,
    pub role: DeviceRole,
    pub numeric_id: i32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            id: DeviceId::generate(),
            name: "Terminal".to_string(),
            role: DeviceRole::default(),
            numeric_id: 0,
        }
    }
}

impl DeviceConfig {
    /// # Errors
    /// Returns `Error::InvalidConfig` if the display name is blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("device.name", "must not be empty"));
        }
        Ok(())
    }
}

/// Local SQLite storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub database_path: PathBuf,
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            max_connections: 5,
        }
    }
}

impl StorageConfig {
    /// # Errors
    /// Returns `Error::InvalidConfig` if the pool size is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(invalid("storage.max_connections", "must be at least 1"));
        }
        Ok(())
    }
}

/// Barrier timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub entry_raise_secs: u64,
    pub exit_raise_secs: u64,
    pub exit_return_delay_secs: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            entry_raise_secs: DEFAULT_ENTRY_GATE_SECS,
            exit_raise_secs: DEFAULT_EXIT_GATE_SECS,
            exit_return_delay_secs: DEFAULT_EXIT_RETURN_DELAY_SECS,
        }
    }
}

impl GateConfig {
    /// All timings zero; used by tests and dry runs.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            entry_raise_secs: 0,
            exit_raise_secs: 0,
            exit_return_delay_secs: 0,
        }
    }

    #[must_use]
    pub fn entry_raise(&self) -> Duration {
        Duration::from_secs(self.entry_raise_secs)
    }

    #[must_use]
    pub fn exit_raise(&self) -> Duration {
        Duration::from_secs(self.exit_raise_secs)
    }

    #[must_use]
    pub fn exit_return_delay(&self) -> Duration {
        Duration::from_secs(self.exit_return_delay_secs)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidConfig {
        field,
        reason: reason.into(),
    }
}
