//! Endpoint configuration: the persisted backend base URL
//!
//! The store keeps a single TOML document (`base_url = "..."`). A missing file
//! means first run and yields the built-in default; a file with an empty
//! `base_url` means the endpoint is deliberately unconfigured.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::{ConfigError, Result, TelemetryError};

/// Base URL used until the operator configures one
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

const CONFIG_DIR: &str = "telemon";
const CONFIG_FILE: &str = "config.toml";

/// The backend location as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default)]
    pub base_url: String,
}

impl EndpointConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Config with no base URL
    pub fn unconfigured() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Resolve into an immutable [`Endpoint`] snapshot
    pub fn resolve(&self) -> Result<Endpoint> {
        if !self.is_configured() {
            return Err(TelemetryError::UnconfiguredEndpoint);
        }
        match validate_url(&self.base_url) {
            Ok(base) => Ok(Endpoint { base }),
            Err(ConfigError::InvalidUrl(msg)) => Err(TelemetryError::InvalidUrl(msg)),
            Err(other) => Err(other.into()),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Check that `url` is an absolute http/https URL with a host
pub fn validate_url(url: &str) -> std::result::Result<Url, ConfigError> {
    let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigError::InvalidUrl(format!(
                "{}: unsupported scheme '{}', expected http or https",
                url, other
            )))
        }
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(format!("{}: missing host", url)));
    }

    Ok(parsed)
}

/// Resolved base URL, captured once per client operation
///
/// Every request an operation issues is built from the same snapshot, so a
/// concurrent `set` on the store cannot split one operation across endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/api/{segments...}`, each segment percent-encoded
    ///
    /// A path prefix on the base URL is kept (`http://host/prefix` gives
    /// `http://host/prefix/api/...`).
    pub fn api_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }
}

/// Anything that can report the current endpoint configuration
pub trait EndpointSource: Send + Sync {
    fn current(&self) -> EndpointConfig;
}

/// A fixed configuration, e.g. a one-off override that is never persisted
impl EndpointSource for EndpointConfig {
    fn current(&self) -> EndpointConfig {
        self.clone()
    }
}

/// Durable store for the endpoint configuration
#[derive(Debug, Clone)]
pub struct EndpointStore {
    path: PathBuf,
}

impl EndpointStore {
    /// Store at the platform config directory (`<config_dir>/telemon/config.toml`)
    pub fn open_default() -> std::result::Result<Self, ConfigError> {
        let dir = dirs::config_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine config directory",
            )
        })?;
        Ok(Self::at(dir.join(CONFIG_DIR).join(CONFIG_FILE)))
    }

    /// Store backed by an explicit file
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persisted config, or the built-in default if none exists. Never fails.
    pub fn get(&self) -> EndpointConfig {
        match fs::read_to_string(&self.path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "Unreadable endpoint config, using default");
                    EndpointConfig::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => EndpointConfig::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read endpoint config, using default");
                EndpointConfig::default()
            }
        }
    }

    /// Validate and persist a new base URL
    ///
    /// On failure the persisted value is left untouched.
    pub fn set(&self, url: &str) -> std::result::Result<(), ConfigError> {
        validate_url(url)?;
        self.write(&EndpointConfig::new(url))?;
        debug!(path = %self.path.display(), base_url = url, "Endpoint config saved");
        Ok(())
    }

    /// Write via a sibling temp file and rename, so readers never see a partial document
    fn write(&self, config: &EndpointConfig) -> std::result::Result<(), ConfigError> {
        let content = toml::to_string(config)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl EndpointSource for EndpointStore {
    fn current(&self) -> EndpointConfig {
        self.get()
    }
}
