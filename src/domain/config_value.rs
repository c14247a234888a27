// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration tree types.
//!
//! This module provides the nested value model that configuration stores hold:
//!
//! - [`Key`]: a mapping key as decoded from a document or built in memory
//! - [`ConfigValue`]: a scalar, a sequence or a nested mapping
//! - [`ConfigTree`]: a mapping from keys to values, the root of every store

use crate::domain::config_key::ConfigKey;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A mapping from keys to configuration values.
///
/// Entries iterate in insertion order. Inserting a key that is already present
/// replaces its value and keeps its position.
pub type ConfigTree = IndexMap<Key, ConfigValue>;

/// A floating point mapping key.
///
/// Keys are compared bitwise, so `NaN` equals itself and `0.0` differs from `-0.0`.
#[derive(Clone, Copy, Debug)]
pub struct FloatKey(f64);

impl FloatKey {
    /// Wraps a float.
    pub fn new(value: f64) -> Self {
        FloatKey(value)
    }

    /// Returns the wrapped float.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatKey {}

impl Hash for FloatKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Serialize for FloatKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl fmt::Display for FloatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// A mapping key.
///
/// Decoders produce whatever key type the document holds. After canonicalization
/// every textual key is a [`Key::Symbol`]; keys with no textual form (integers,
/// floats, booleans, null) stay as they were decoded.
///
/// # Examples
///
/// ```
/// use envcfg::domain::config_key::ConfigKey;
/// use envcfg::domain::config_value::Key;
///
/// let raw = Key::from("name");
/// assert_eq!(raw.symbolize(), Key::Symbol(ConfigKey::from("name")));
///
/// let index = Key::Integer(3);
/// assert_eq!(index.clone().symbolize(), index);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Key {
    /// A canonical key.
    Symbol(ConfigKey),
    /// A plain string key that has not been canonicalized.
    String(String),
    /// An integer key.
    Integer(i64),
    /// A floating point key.
    Float(FloatKey),
    /// A boolean key.
    Bool(bool),
    /// A null key.
    Null,
}

impl Key {
    /// Converts the key to the canonical key type.
    ///
    /// Symbols and strings convert; any other key is handed back unchanged in `Err`.
    pub fn to_canonical(self) -> std::result::Result<ConfigKey, Key> {
        match self {
            Key::Symbol(key) => Ok(key),
            Key::String(s) => Ok(ConfigKey::from(s)),
            other => Err(other),
        }
    }

    /// Converts the key to a symbol if possible, otherwise returns it unchanged.
    pub fn symbolize(self) -> Key {
        match self.to_canonical() {
            Ok(key) => Key::Symbol(key),
            Err(original) => original,
        }
    }

    /// Converts the key to a plain string key.
    ///
    /// Every key has a textual form; null becomes the empty string.
    pub fn stringify(self) -> Key {
        match self {
            Key::Symbol(key) => Key::String(key.into()),
            Key::String(s) => Key::String(s),
            Key::Integer(i) => Key::String(i.to_string()),
            Key::Float(x) => Key::String(x.to_string()),
            Key::Bool(b) => Key::String(b.to_string()),
            Key::Null => Key::String(String::new()),
        }
    }

    /// Returns the canonical key if this is a symbol.
    pub fn as_symbol(&self) -> Option<&ConfigKey> {
        match self {
            Key::Symbol(key) => Some(key),
            _ => None,
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::String(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::String(s)
    }
}

impl From<ConfigKey> for Key {
    fn from(key: ConfigKey) -> Self {
        Key::Symbol(key)
    }
}

impl From<&ConfigKey> for Key {
    fn from(key: &ConfigKey) -> Self {
        Key::Symbol(key.clone())
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Integer(i)
    }
}

impl From<f64> for Key {
    fn from(x: f64) -> Self {
        Key::Float(FloatKey::new(x))
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Symbol(key) => write!(f, "{}", key),
            Key::String(s) => write!(f, "{:?}", s),
            Key::Integer(i) => write!(f, "{}", i),
            Key::Float(x) => write!(f, "{}", x),
            Key::Bool(b) => write!(f, "{}", b),
            Key::Null => f.write_str("null"),
        }
    }
}

/// A configuration value.
///
/// # Examples
///
/// ```
/// use envcfg::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::mapping([("host", ConfigValue::from("localhost")), ("port", 5432.into())]);
/// assert_eq!(value.to_string(), r#"{"host": "localhost", "port": 5432}"#);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered sequence of values.
    Sequence(Vec<ConfigValue>),
    /// A nested mapping.
    Mapping(ConfigTree),
}

impl ConfigValue {
    /// Builds a mapping value from key/value pairs.
    pub fn mapping<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<ConfigValue>,
    {
        ConfigValue::Mapping(config_tree(entries))
    }

    /// Returns a short name for the kind of value, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Sequence(_) => "sequence",
            ConfigValue::Mapping(_) => "mapping",
        }
    }

    /// Returns true if the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns the string if the value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if the value is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if the value is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the number as a float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(f) => Some(*f),
            ConfigValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the elements if the value is a sequence.
    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested mapping if the value is a mapping.
    pub fn as_mapping(&self) -> Option<&ConfigTree> {
        match self {
            ConfigValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the nested mapping mutably if the value is a mapping.
    pub fn as_mapping_mut(&mut self) -> Option<&mut ConfigTree> {
        match self {
            ConfigValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Consumes the value, returning the mapping if it is one.
    pub fn into_mapping(self) -> Option<ConfigTree> {
        match self {
            ConfigValue::Mapping(map) => Some(map),
            _ => None,
        }
    }
}

/// Builds a [`ConfigTree`] from key/value pairs, in order. Later pairs overwrite
/// earlier ones.
///
/// # Examples
///
/// ```
/// use envcfg::domain::config_value::{config_tree, ConfigValue, Key};
///
/// let tree = config_tree([("a", 1), ("b", 2), ("a", 3)]);
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.get(&Key::from("a")), Some(&ConfigValue::Integer(3)));
/// ```
pub fn config_tree<K, V, I>(entries: I) -> ConfigTree
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Key>,
    V: Into<ConfigValue>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Integer(i)
    }
}

impl From<i32> for ConfigValue {
    fn from(i: i32) -> Self {
        ConfigValue::Integer(i64::from(i))
    }
}

impl From<u32> for ConfigValue {
    fn from(i: u32) -> Self {
        ConfigValue::Integer(i64::from(i))
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float(f)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(items: Vec<T>) -> Self {
        ConfigValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<ConfigTree> for ConfigValue {
    fn from(map: ConfigTree) -> Self {
        ConfigValue::Mapping(map)
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ConfigValue::Null, Into::into)
    }
}

/// Displays a [`ConfigTree`] in the same notation as a mapping [`ConfigValue`].
pub struct DisplayTree<'a>(pub &'a ConfigTree);

impl fmt::Display for DisplayTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => f.write_str("null"),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Integer(i) => write!(f, "{}", i),
            ConfigValue::Float(x) => write!(f, "{:?}", x),
            ConfigValue::String(s) => write!(f, "{:?}", s),
            ConfigValue::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            ConfigValue::Mapping(map) => write!(f, "{}", DisplayTree(map)),
        }
    }
}
