//! Application settings and paths.
//!
//! Settings live in `settings.json` under the XDG config directory unless
//! a path is given explicitly. A missing file means built-in defaults.

use crate::error::{ConfigError, ConfigResult};
use crate::probe::ProbeKind;
use crate::types::{Port, DEFAULT_TIMEOUT};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

/// Global paths singleton.
static PATHS: OnceLock<Option<Paths>> = OnceLock::new();

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portprobe)
    pub config_dir: PathBuf,
}

impl Paths {
    /// The global paths, or `None` when no home directory can be found.
    pub fn get() -> Option<&'static Paths> {
        PATHS
            .get_or_init(|| {
                ProjectDirs::from("com", "portprobe", "portprobe").map(|project| Self {
                    config_dir: project.config_dir().to_path_buf(),
                })
            })
            .as_ref()
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// A port to probe and the protocol label that decides how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortConfig {
    pub port: Port,
    pub protocol: String,
}

impl PortConfig {
    pub fn new(port: u16, protocol: impl Into<String>) -> Option<Self> {
        Port::new(port).map(|port| Self {
            port,
            protocol: protocol.into(),
        })
    }

    pub fn probe_kind(&self) -> ProbeKind {
        ProbeKind::from_label(&self.protocol)
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Per-probe timeout in milliseconds.
    pub timeout_ms: u64,
    /// Hosts swept when none are given on the command line.
    pub hosts: Vec<String>,
    /// Ports swept on every host, in order.
    pub ports: Vec<PortConfig>,
}

impl Default for AppSettings {
    fn default() -> Self {
        let ports = [(22, "SSH"), (3389, "RDP"), (5900, "VNC"), (443, "HTTPS")]
            .into_iter()
            .filter_map(|(port, label)| PortConfig::new(port, label))
            .collect();

        Self {
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            hosts: vec!["127.0.0.1".to_string(), "localhost".to_string()],
            ports,
        }
    }
}

impl AppSettings {
    /// Load settings from `path` if given, else from the default location,
    /// else fall back to defaults.
    pub fn resolve(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Load settings from the default location.
    pub fn load() -> ConfigResult<Self> {
        match Paths::get().map(Paths::settings_file) {
            Some(file) if file.exists() => Self::load_from(&file),
            _ => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFailed {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Default location for the settings file.
    pub fn default_path() -> ConfigResult<PathBuf> {
        Paths::get()
            .map(Paths::settings_file)
            .ok_or(ConfigError::DirectoryNotFound)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be positive".to_string()));
        }
        if self.hosts.is_empty() {
            return Err(ConfigError::Invalid("at least one host is required".to_string()));
        }
        if self.hosts.iter().any(|h| h.trim().is_empty()) {
            return Err(ConfigError::Invalid("host names must not be empty".to_string()));
        }
        if self.ports.is_empty() {
            return Err(ConfigError::Invalid("at least one port is required".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
