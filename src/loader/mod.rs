//! Configuration load path.
//!
//! Reads the raw double-configuration file, merges the template and
//! system documents, and deserializes the result into the typed schema.
//! A failure at any step aborts the load with a distinct error kind;
//! callers decide what happens to any previously loaded configuration
//! (see [`crate::store::ConfigStore`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::merge::{merge_double_config, MergeError};
use crate::schema::{PortalConfig, SchemaError};

/// Errors raised on the load path
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read configuration file: {0}")]
    Io(#[from] io::Error),

    #[error("configuration file is not valid JSON: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error(transparent)]
    TypeMismatch(#[from] MergeError),

    #[error(transparent)]
    SchemaMismatch(#[from] SchemaError),
}

/// Provenance of a loaded configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    /// Path the configuration was read from
    pub path: String,

    /// SHA-256 digest of the raw file bytes
    pub digest: String,
}

/// A successfully loaded configuration with provenance
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The typed configuration
    pub config: PortalConfig,

    /// The merged generic document the configuration was deserialized from
    pub merged: Value,

    /// Where the configuration came from
    pub source: ConfigSource,

    /// When the load completed
    pub loaded_at: DateTime<Utc>,
}

/// Load, merge, and deserialize a double-configuration file.
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    info!(path = %path.display(), "loading unmerged template/system configuration file");

    let bytes = read_bytes(path)?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let raw: Value = serde_json::from_slice(&bytes)?;
    let merged = merge_double_config(&raw)?;
    debug!(merged = %merged, "merged configuration result");

    let config = PortalConfig::from_merged(merged.clone())?;
    info!(
        digest = %digest,
        devices = config.devices.len(),
        rooms = config.rooms.len(),
        "loaded merged configuration"
    );

    Ok(LoadedConfig {
        config,
        merged,
        source: ConfigSource {
            path: path.display().to_string(),
            digest,
        },
        loaded_at: Utc::now(),
    })
}

/// Read and merge a double-configuration file without deserializing it
/// into the typed schema. Used to inspect the merged document directly.
pub fn merge_file(path: &Path) -> Result<Value, ConfigError> {
    let bytes = read_bytes(path)?;
    let raw: Value = serde_json::from_slice(&bytes)?;
    Ok(merge_double_config(&raw)?)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ConfigError> {
    fs::read(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            error!(path = %path.display(), "configuration file not present");
            ConfigError::FileNotFound(path.to_path_buf())
        } else {
            ConfigError::Io(err)
        }
    })
}
