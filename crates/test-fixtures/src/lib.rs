//! Test fixtures for the grounding workspace: JSON transcripts and claim
//! sets, plus deterministic provider doubles.

pub mod http;
pub mod providers;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the fixture data shipped with this crate.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Load a fixture file as a string, without parsing.
pub fn load_fixture_text(relative_path: &str) -> String {
    let path = fixtures_root().join(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}
