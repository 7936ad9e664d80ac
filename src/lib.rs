//! Portal configuration merge engine
//!
//! Resolves a single deployed configuration from two partial documents —
//! a reusable template and a site-specific system document — by
//! deep-merging them under fixed per-section policies, then
//! deserializing the result into the typed application schema.

pub mod loader;
pub mod merge;
pub mod schema;
pub mod store;

pub use loader::{load_config, merge_file, ConfigError, ConfigSource, LoadedConfig};
pub use merge::{merge_arrays_by_key, merge_double_config, merge_objects, MergeError, ValueKind};
pub use schema::{DeviceConfig, InfoConfig, PortalConfig, RoomConfig, SchemaError};
pub use store::ConfigStore;
