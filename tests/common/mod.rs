// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for integration tests.

use envcfg::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Installs a test-friendly tracing subscriber once per test binary.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Writes `content` to a temporary `.yml` file.
#[allow(dead_code)]
pub fn yaml_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yml")
        .tempfile()
        .expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

/// The tree used by most scenarios: a `default` and a `production` section.
#[allow(dead_code)]
pub fn layered_tree() -> ConfigTree {
    config_tree([
        (
            "default",
            ConfigValue::mapping([
                ("a", ConfigValue::from(1)),
                ("host", "localhost".into()),
                ("shared", "default".into()),
            ]),
        ),
        (
            "production",
            ConfigValue::mapping([("a", ConfigValue::from(2)), ("host", "db.example.com".into())]),
        ),
        ("shared", ConfigValue::from("top")),
        ("top_only", ConfigValue::from("top")),
    ])
}
