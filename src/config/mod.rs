use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{Coordinate, Zone, ZoneError, ZoneSet};
use crate::store::StoreBackend;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid zone configuration")]
    Zone(#[from] ZoneError),
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
}

/// Contents of a `geofence.toml`
///
/// ```toml
/// [server]
/// bind = "127.0.0.1:8080"
///
/// [store]
/// backend = "sharded"
///
/// [[zones]]
/// id = "zone_1"
/// name = "City Center"
/// boundary = [
///   { lat = 10.0, lon = 10.0 }, { lat = 10.0, lon = 20.0 },
///   { lat = 20.0, lon = 20.0 }, { lat = 20.0, lon = 10.0 },
/// ]
/// ```
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl FileConfig {
    /// Search the usual locations and return the first config that parses
    pub fn load() -> Option<Self> {
        Self::load_from(&get_config_paths())
    }

    /// First file in `paths` that exists and parses; unreadable or invalid
    /// files are logged and skipped
    pub fn load_from(paths: &[PathBuf]) -> Option<Self> {
        for path in paths {
            if !path.exists() {
                continue;
            }
            match Self::from_path(path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded config file");
                    return Some(config);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping config file");
                }
            }
        }
        None
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Configured zones in file order, or the built-in zone when none are set
    pub fn zone_set(&self) -> Result<ZoneSet, ConfigError> {
        let zones = if self.zones.is_empty() {
            default_zones()
        } else {
            self.zones.clone()
        };
        Ok(ZoneSet::new(zones)?)
    }
}

/// The single "City Center" square used when no zones are configured
pub fn default_zones() -> Vec<Zone> {
    vec![Zone::new(
        "zone_1",
        "City Center",
        vec![
            Coordinate::new(10.0, 10.0),
            Coordinate::new(10.0, 20.0),
            Coordinate::new(20.0, 20.0),
            Coordinate::new(20.0, 10.0),
        ],
    )]
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("geofence.toml"));
    paths.push(PathBuf::from(".geofence.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("geofence").join("config.toml"));
        paths.push(config_dir.join("geofence.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".geofence.toml"));
    }

    paths
}
