//! Active-configuration holder.
//!
//! Owns the configuration currently in effect. A load replaces the
//! active configuration only when every step of the load path succeeds;
//! a failed load leaves the previous configuration in place.

use std::path::Path;

use crate::loader::{load_config, ConfigError, LoadedConfig};

/// Holder for the configuration currently in effect
#[derive(Debug, Default)]
pub struct ConfigStore {
    active: Option<LoadedConfig>,
}

impl ConfigStore {
    /// Create an empty store with no active configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration file and make it active.
    ///
    /// On failure the previously active configuration, if any, stays in
    /// effect and the error is returned to the caller.
    pub fn load(&mut self, path: &Path) -> Result<&LoadedConfig, ConfigError> {
        let loaded = load_config(path)?;
        Ok(self.active.insert(loaded))
    }

    /// The configuration currently in effect, if any
    pub fn active(&self) -> Option<&LoadedConfig> {
        self.active.as_ref()
    }

    /// Look up a device group in the active configuration.
    ///
    /// Returns `None` when no configuration is active, the device is
    /// unknown, or the device carries no group.
    pub fn group_for_device_key(&self, key: &str) -> Option<&str> {
        self.active.as_ref()?.config.group_for_device_key(key)
    }
}
