// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-aware configuration store trait.
//!
//! This module defines the `ConfigStore` trait, the interface shared by every
//! configuration backend. A store owns one [`ConfigTree`] and an environment tag.
//! Lookups search, in order:
//!
//! 1. the section named by the current environment,
//! 2. the `default` section,
//! 3. the top level of the tree.
//!
//! Backends only provide access to their tree and environment tag; resolution,
//! typed access and writes are provided methods.

use crate::domain::config_key::ConfigKey;
use crate::domain::config_value::{ConfigTree, ConfigValue, DisplayTree, Key};
use crate::domain::errors::{ConfigError, Result};

/// Name of the fallback section searched after the current environment.
pub const DEFAULT_ENVIRONMENT: &str = "default";

/// Resolves `key` in `tree` for environment `env`.
///
/// Sections that are not mappings are skipped. Returns `None` when no tier holds
/// the key.
///
/// # Examples
///
/// ```
/// use envcfg::domain::config_value::{config_tree, ConfigValue};
/// use envcfg::domain::store::resolve;
/// use envcfg::domain::transform::deep_symbolize_keys;
/// use envcfg::domain::ConfigKey;
///
/// let tree = deep_symbolize_keys(&config_tree([
///     ("default", ConfigValue::mapping([("a", 1)])),
///     ("production", ConfigValue::mapping([("a", 2)])),
/// ]));
///
/// let env = ConfigKey::from("production");
/// assert_eq!(resolve(&tree, &env, &ConfigKey::from("a")), Some(&ConfigValue::from(2)));
/// ```
pub fn resolve<'a>(
    tree: &'a ConfigTree,
    env: &ConfigKey,
    key: &ConfigKey,
) -> Option<&'a ConfigValue> {
    let wanted = Key::Symbol(key.clone());
    let in_section = |section: ConfigKey| {
        tree.get(&Key::Symbol(section))
            .and_then(ConfigValue::as_mapping)
            .and_then(|map| map.get(&wanted))
    };

    if let Some(value) = in_section(env.clone()) {
        return Some(value);
    }
    if let Some(value) = in_section(ConfigKey::default_environment()) {
        return Some(value);
    }

    let value = tree.get(&wanted);
    if value.is_some() {
        tracing::trace!(key = %key, env = %env, "resolved configuration entry at top level");
    }
    value
}

/// An environment-aware configuration store.
///
/// Keys may be given as `&str`, `String` or [`ConfigKey`]; all of them name the
/// same entry.
///
/// # Examples
///
/// ```rust
/// use envcfg::prelude::*;
///
/// # fn main() -> Result<()> {
/// let tree = config_tree([
///     ("default", ConfigValue::mapping([("a", 1)])),
///     ("production", ConfigValue::mapping([("a", 2)])),
/// ]);
/// let mut store = MemoryConfigStore::with_environment(tree, "production");
/// assert_eq!(store.get("a")?, &ConfigValue::from(2));
///
/// store.set_environment("development");
/// assert_eq!(store.get("a")?, &ConfigValue::from(1));
/// # Ok(())
/// # }
/// ```
pub trait ConfigStore {
    /// Returns the configuration tree.
    fn tree(&self) -> &ConfigTree;

    /// Returns the configuration tree mutably.
    ///
    /// Keys inserted through this handle should be symbols, or lookups will not
    /// find them.
    fn tree_mut(&mut self) -> &mut ConfigTree;

    /// Returns the current environment tag.
    fn environment(&self) -> &ConfigKey;

    /// Replaces the environment tag used by subsequent lookups.
    ///
    /// The tag is not required to name an existing section.
    fn set_environment(&mut self, env: impl Into<ConfigKey>);

    /// Resolves `key` through the environment, `default` and top-level tiers.
    fn lookup(&self, key: impl Into<ConfigKey>) -> Option<&ConfigValue> {
        resolve(self.tree(), self.environment(), &key.into())
    }

    /// Returns true if any tier holds `key`.
    fn has(&self, key: impl Into<ConfigKey>) -> bool {
        self.lookup(key).is_some()
    }

    /// Retrieves the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEntry`] if no tier holds the key.
    fn get(&self, key: impl Into<ConfigKey>) -> Result<&ConfigValue> {
        let key = key.into();
        self.lookup(&key).ok_or_else(|| ConfigError::MissingEntry {
            key: key.to_string(),
        })
    }

    /// Retrieves the value for `key`, falling back to `default` when given.
    ///
    /// A supplied default is returned exactly as given, including `false`, `0`,
    /// empty strings and null.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEntry`] if no tier holds the key and
    /// `default` is `None`.
    fn fetch(&self, key: impl Into<ConfigKey>, default: Option<ConfigValue>) -> Result<ConfigValue> {
        let key = key.into();
        match (self.lookup(&key), default) {
            (Some(value), _) => Ok(value.clone()),
            (None, Some(default)) => Ok(default),
            (None, None) => Err(ConfigError::MissingEntry {
                key: key.to_string(),
            }),
        }
    }

    /// Retrieves the value for `key`, or `default` if no tier holds it.
    fn get_or(&self, key: impl Into<ConfigKey>, default: impl Into<ConfigValue>) -> ConfigValue {
        match self.lookup(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Retrieves a string value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEntry`] or [`ConfigError::TypeMismatch`].
    fn get_str(&self, key: impl Into<ConfigKey>) -> Result<&str> {
        let key = key.into();
        let value = self.get(&key)?;
        value.as_str().ok_or_else(|| mismatch(&key, "string", value))
    }

    /// Retrieves a boolean value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEntry`] or [`ConfigError::TypeMismatch`].
    fn get_bool(&self, key: impl Into<ConfigKey>) -> Result<bool> {
        let key = key.into();
        let value = self.get(&key)?;
        value.as_bool().ok_or_else(|| mismatch(&key, "boolean", value))
    }

    /// Retrieves an integer value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEntry`] or [`ConfigError::TypeMismatch`].
    fn get_i64(&self, key: impl Into<ConfigKey>) -> Result<i64> {
        let key = key.into();
        let value = self.get(&key)?;
        value.as_i64().ok_or_else(|| mismatch(&key, "integer", value))
    }

    /// Retrieves a number as a float. Integers are widened.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEntry`] or [`ConfigError::TypeMismatch`].
    fn get_f64(&self, key: impl Into<ConfigKey>) -> Result<f64> {
        let key = key.into();
        let value = self.get(&key)?;
        value.as_f64().ok_or_else(|| mismatch(&key, "float", value))
    }

    /// Writes `key` into the `default` section.
    fn set(&mut self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) {
        self.set_in(key, value, ConfigKey::default_environment())
    }

    /// Writes `key` into the section named `env`, creating the section if needed.
    ///
    /// A section that exists but is not a mapping is replaced. The write only
    /// affects this store's tree.
    fn set_in(
        &mut self,
        key: impl Into<ConfigKey>,
        value: impl Into<ConfigValue>,
        env: impl Into<ConfigKey>,
    ) {
        let env = env.into();
        let key = key.into();
        tracing::debug!(key = %key, env = %env, "setting configuration entry");

        let section = self
            .tree_mut()
            .entry(Key::Symbol(env))
            .or_insert_with(|| ConfigValue::Mapping(ConfigTree::new()));
        if !matches!(section, ConfigValue::Mapping(_)) {
            *section = ConfigValue::Mapping(ConfigTree::new());
        }
        if let ConfigValue::Mapping(map) = section {
            map.insert(Key::Symbol(key), value.into());
        }
    }

    /// Renders the whole tree for diagnostics.
    fn print(&self) -> String {
        DisplayTree(self.tree()).to_string()
    }
}

fn mismatch(key: &ConfigKey, expected: &'static str, found: &ConfigValue) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}
