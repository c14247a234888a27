// SPDX-License-Identifier: MIT OR Apache-2.0

//! An environment-aware configuration accessor.
//!
//! This crate provides a uniform lookup interface over a nested configuration tree
//! in which values can be overridden per named environment (such as `development`
//! or `production`), falling back to a `default` section and then to the top-level
//! keys of the tree.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: The configuration tree (`ConfigKey`, `Key`, `ConfigValue`),
//!   key transformations, errors and the `ConfigStore` contract
//! - **Ports**: Trait definitions for collaborators (`ConfigParser`)
//! - **Adapters**: Stores over in-memory trees and files, and the YAML parser
//!
//! # Resolution Order
//!
//! `get(key)` returns the first match of:
//!
//! 1. the section named by the store's current environment,
//! 2. the `default` section,
//! 3. the top level of the tree.
//!
//! With no match, `get` fails with [`ConfigError::MissingEntry`] while `get_or`
//! and `fetch` return the supplied default.
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//!
//! # Quick Start
//!
//! ```rust
//! use envcfg::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let tree = config_tree([
//!     ("default", ConfigValue::mapping([("a", 1)])),
//!     ("production", ConfigValue::mapping([("a", 2)])),
//! ]);
//!
//! let mut store = MemoryConfigStore::with_environment(tree, "production");
//! assert_eq!(store.get_i64("a")?, 2);
//!
//! store.set_environment("development");
//! assert_eq!(store.get_i64("a")?, 1);
//! assert_eq!(store.get_or("missing", false), ConfigValue::from(false));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use domain::{ConfigError, ConfigFileError};

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{FileConfigStore, MemoryConfigStore};
    pub use crate::domain::{
        config_tree, ConfigError, ConfigFileError, ConfigKey, ConfigStore, ConfigTree,
        ConfigValue, Key, Result,
    };
    pub use crate::ports::ConfigParser;

    // Re-export adapters based on feature flags
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlParser;
}
