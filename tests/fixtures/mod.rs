//! Shared fixtures for the integration suites.

use std::path::{Path, PathBuf};

/// Path to the realistic double-configuration fixture
pub fn double_config_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/double_config.json")
}
