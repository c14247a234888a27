// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML document parser adapter.
//!
//! This module decodes YAML documents into configuration trees using `serde_yaml`.
//! Nested mappings and sequences are kept as they are, mappings in document order;
//! tags are dropped and the tagged value is used in their place. When a stream
//! holds several documents only the first one is read.

use crate::domain::{ConfigValue, Key};
use crate::ports::{ConfigParser, ParseError};
use serde::Deserialize;
use serde_yaml::{Deserializer, Value};

/// YAML parser implementation.
///
/// # Examples
///
/// ```rust
/// use envcfg::adapters::YamlParser;
/// use envcfg::domain::{ConfigValue, Key};
/// use envcfg::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let value = parser.parse("database:\n  host: localhost\n  port: 5432").unwrap().unwrap();
///
/// let database = value.as_mapping().unwrap()[&Key::from("database")].as_mapping().unwrap();
/// assert_eq!(database[&Key::from("port")], ConfigValue::from(5432));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<Option<ConfigValue>, ParseError> {
        if is_blank_document(content) {
            return Ok(None);
        }

        let document = match Deserializer::from_str(content).next() {
            Some(document) => document,
            None => return Ok(None),
        };
        let value = Value::deserialize(document)?;
        match ConfigValue::from(value) {
            ConfigValue::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

// A document with nothing but whitespace, comments and markers holds no value.
fn is_blank_document(content: &str) -> bool {
    content.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

impl From<Value> for ConfigValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => n.as_f64().map_or(ConfigValue::Null, ConfigValue::Float),
            },
            Value::String(s) => ConfigValue::String(s),
            Value::Sequence(items) => {
                ConfigValue::Sequence(items.into_iter().map(ConfigValue::from).collect())
            }
            Value::Mapping(map) => ConfigValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (Key::from(k), ConfigValue::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => ConfigValue::from(tagged.value),
        }
    }
}

impl From<Value> for Key {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Key::Null,
            Value::Bool(b) => Key::Bool(b),
            Value::String(s) => Key::String(s),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Key::Integer(i),
                (None, Some(x)) => Key::from(x),
                (None, None) => Key::String(n.to_string()),
            },
            Value::Tagged(tagged) => Key::from(tagged.value),
            // Collection keys have no counterpart; keep their YAML text.
            complex => Key::String(
                serde_yaml::to_string(&complex)
                    .map(|s| s.trim_end().to_string())
                    .unwrap_or_default(),
            ),
        }
    }
}
