// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical configuration key type.
//!
//! This module provides the `ConfigKey` type, an interned, symbol-like identifier.
//! Every string key of a loaded configuration tree is converted to a `ConfigKey`,
//! and lookups accept either plain strings or keys, which compare equal when they
//! name the same identifier.

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Process-wide pool of interned key names.
static INTERNER: Lazy<Mutex<HashSet<Arc<str>>>> = Lazy::new(|| Mutex::new(HashSet::new()));

fn intern(name: &str) -> Arc<str> {
    let mut pool = INTERNER.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(existing) = pool.get(name) {
        return Arc::clone(existing);
    }
    let interned: Arc<str> = Arc::from(name);
    pool.insert(Arc::clone(&interned));
    interned
}

/// An interned, symbol-like configuration key.
///
/// Two keys created from the same text share one allocation, so cloning a key is a
/// reference count bump. Keys compare, hash and order by their text.
///
/// # Examples
///
/// ```
/// use envcfg::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("database");
/// let same = ConfigKey::new(String::from("database"));
///
/// assert_eq!(key, same);
/// assert_eq!(key.as_str(), "database");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(Arc<str>);

impl ConfigKey {
    /// Creates a key, interning `name`.
    pub fn new(name: impl AsRef<str>) -> Self {
        ConfigKey(intern(name.as_ref()))
    }

    /// The key of the fallback section, `default`.
    ///
    /// # Examples
    ///
    /// ```
    /// use envcfg::domain::config_key::ConfigKey;
    ///
    /// assert_eq!(ConfigKey::default_environment().as_str(), "default");
    /// ```
    pub fn default_environment() -> Self {
        ConfigKey::new(crate::domain::store::DEFAULT_ENVIRONMENT)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if both keys share the same interned allocation.
    pub fn ptr_eq(&self, other: &ConfigKey) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey::new(s)
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey::new(s)
    }
}

impl From<&String> for ConfigKey {
    fn from(s: &String) -> Self {
        ConfigKey::new(s)
    }
}

impl From<&ConfigKey> for ConfigKey {
    fn from(key: &ConfigKey) -> Self {
        key.clone()
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.as_str().to_string()
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ConfigKey {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ConfigKey {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl Serialize for ConfigKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
