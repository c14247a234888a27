// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory configuration store adapter.
//!
//! This module provides a store wrapping a tree built in code, such as defaults
//! compiled into an application or fixtures in tests.

use crate::domain::transform::deep_symbolize_keys_in_place;
use crate::domain::{ConfigKey, ConfigStore, ConfigTree};

/// Configuration store over an in-memory tree.
///
/// All textual keys of the tree are converted to symbols when the store is built.
///
/// # Examples
///
/// ```rust
/// use envcfg::prelude::*;
///
/// # fn main() -> Result<()> {
/// let mut store = MemoryConfigStore::new(config_tree([
///     ("default", ConfigValue::mapping([("timeout", 30)])),
/// ]));
///
/// assert_eq!(store.get_i64("timeout")?, 30);
///
/// store.set_in("timeout", 5, "test");
/// store.set_environment("test");
/// assert_eq!(store.get_i64("timeout")?, 5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryConfigStore {
    /// Canonicalized configuration tree
    tree: ConfigTree,
    /// Section searched first
    env: ConfigKey,
}

impl MemoryConfigStore {
    /// Creates a store over `tree` using the `default` environment.
    pub fn new(tree: ConfigTree) -> Self {
        Self::with_environment(tree, ConfigKey::default_environment())
    }

    /// Creates a store over `tree` using environment `env`.
    pub fn with_environment(mut tree: ConfigTree, env: impl Into<ConfigKey>) -> Self {
        deep_symbolize_keys_in_place(&mut tree);
        let env = env.into();
        tracing::debug!(env = %env, entries = tree.len(), "created in-memory configuration store");
        Self { tree, env }
    }

    /// Consumes the store, returning its tree.
    pub fn into_tree(self) -> ConfigTree {
        self.tree
    }
}

impl Default for MemoryConfigStore {
    fn default() -> Self {
        Self::new(ConfigTree::new())
    }
}

impl From<ConfigTree> for MemoryConfigStore {
    fn from(tree: ConfigTree) -> Self {
        Self::new(tree)
    }
}

impl ConfigStore for MemoryConfigStore {
    fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    fn tree_mut(&mut self) -> &mut ConfigTree {
        &mut self.tree
    }

    fn environment(&self) -> &ConfigKey {
        &self.env
    }

    fn set_environment(&mut self, env: impl Into<ConfigKey>) {
        self.env = env.into();
        tracing::debug!(env = %self.env, "switched configuration environment");
    }
}
