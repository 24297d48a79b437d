//! Shared test utilities

use std::path::PathBuf;

/// Cached binary path for the oastool CLI to avoid repeated lookups
#[allow(deprecated, dead_code)]
pub static OASTOOL_BIN: std::sync::LazyLock<PathBuf> =
    std::sync::LazyLock::new(|| assert_cmd::cargo::cargo_bin("oastool"));

/// Test helper to create a command with the cached binary
#[allow(dead_code)]
pub fn oastool_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(&*OASTOOL_BIN)
}

/// Path of a file under `tests/fixtures`
#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Parsed copy of a fixture document
#[allow(dead_code)]
pub fn load_fixture(name: &str) -> serde_json::Value {
    oastool::spec::load_document(&fixture(name)).expect("fixture should parse")
}
