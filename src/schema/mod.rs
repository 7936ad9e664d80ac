//! Typed application schema for the merged portal document.
//!
//! The merge engine produces a generic tree; this module deserializes it
//! into the strongly-typed configuration the application consumes and
//! provides the device group lookup used during device instantiation.
//! Unknown attributes are retained rather than rejected, since template
//! authors routinely carry fields this crate has no interest in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error raised when the merged document does not fit the schema
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("schema mismatch: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Top-level merged configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Deployment information block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<InfoConfig>,

    /// Devices to instantiate, in template order
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,

    /// Room definitions
    #[serde(default)]
    pub rooms: Vec<RoomConfig>,

    /// Source lists keyed by list id; entries are opaque to this crate
    #[serde(default, rename = "sourceLists")]
    pub source_lists: Map<String, Value>,

    /// Tie-line topology; template-owned and opaque to this crate
    #[serde(default, rename = "tieLines")]
    pub tie_lines: Vec<Value>,

    /// Portal URL the system document was fetched from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_url: Option<String>,

    /// Portal URL the template document was fetched from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_url: Option<String>,
}

/// The `info` section: deployment metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoConfig {
    /// Display name of the deployment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Attributes outside the known set, preserved as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the merged `devices` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Unique device key, used for lookups (matched case-insensitively)
    pub key: String,

    /// Identifier the merge correlates template and system entries on;
    /// numeric or string depending on the producer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Device group, e.g. "display" or "pjlink"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Device type identifier
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,

    /// Device-specific properties, opaque to this crate
    #[serde(default)]
    pub properties: Value,

    /// Attributes outside the known set, preserved as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the merged `rooms` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Unique room key the merge correlates template and system entries on
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Attributes outside the known set, preserved as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PortalConfig {
    /// Deserialize a merged document into the typed schema.
    pub fn from_merged(merged: Value) -> Result<Self, SchemaError> {
        Ok(serde_json::from_value(merged)?)
    }

    /// Look up the group attribute for a device key.
    ///
    /// Keys are matched case-insensitively. Returns `None` when no
    /// device carries the key, or the device has no group; neither is an
    /// error.
    pub fn group_for_device_key(&self, key: &str) -> Option<&str> {
        self.devices
            .iter()
            .find(|device| device.key.eq_ignore_ascii_case(key))
            .and_then(|device| device.group.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "info": {"name": "Room 401", "helpMessage": "Call x1234"},
            "devices": [
                {"key": "display-1", "uid": 1, "group": "display", "type": "pjlink",
                 "properties": {"control": {"method": "tcpIp"}}},
                {"key": "codec-1", "uid": 2, "group": "vc"},
                {"key": "touchpanel-1", "uid": 3}
            ],
            "rooms": [{"key": "room1", "name": "Conference 401", "sourceListKey": "default"}],
            "sourceLists": {"default": {"1": {"name": "PC"}}},
            "tieLines": [{"from": "codec-1", "to": "display-1"}],
            "system_url": "https://portal.example.com/systems/401"
        })
    }

    #[test]
    fn test_from_merged() {
        let config = PortalConfig::from_merged(sample()).unwrap();

        assert_eq!(config.devices.len(), 3);
        assert_eq!(config.devices[0].key, "display-1");
        assert_eq!(config.devices[0].device_type.as_deref(), Some("pjlink"));
        assert_eq!(config.rooms.len(), 1);
        assert_eq!(config.source_lists.len(), 1);
        assert_eq!(config.tie_lines.len(), 1);
        assert_eq!(
            config.system_url.as_deref(),
            Some("https://portal.example.com/systems/401")
        );
        assert!(config.template_url.is_none());
    }

    #[test]
    fn test_sections_default_when_absent() {
        let config = PortalConfig::from_merged(json!({})).unwrap();

        assert!(config.info.is_none());
        assert!(config.devices.is_empty());
        assert!(config.rooms.is_empty());
        assert!(config.source_lists.is_empty());
        assert!(config.tie_lines.is_empty());
    }

    #[test]
    fn test_unknown_attributes_retained() {
        let config = PortalConfig::from_merged(sample()).unwrap();

        let info = config.info.unwrap();
        assert_eq!(info.extra["helpMessage"], "Call x1234");
        assert_eq!(config.rooms[0].extra["sourceListKey"], "default");
    }

    #[test]
    fn test_device_without_key_rejected() {
        let merged = json!({"devices": [{"uid": 1, "group": "display"}]});

        assert!(PortalConfig::from_merged(merged).is_err());
    }

    #[test]
    fn test_group_lookup_case_insensitive() {
        let config = PortalConfig::from_merged(sample()).unwrap();

        assert_eq!(config.group_for_device_key("DISPLAY-1"), Some("display"));
        assert_eq!(config.group_for_device_key("codec-1"), Some("vc"));
    }

    #[test]
    fn test_group_lookup_absent_results() {
        let config = PortalConfig::from_merged(sample()).unwrap();

        // Unknown device and device without a group both come back empty.
        assert_eq!(config.group_for_device_key("no-such-device"), None);
        assert_eq!(config.group_for_device_key("touchpanel-1"), None);
    }
}
