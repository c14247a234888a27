// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the configuration tree model, the key transformations that
//! canonicalize loaded trees, and the environment-aware store contract. It is
//! independent of any file format or backend.

pub mod config_key;
pub mod config_value;
pub mod errors;
pub mod store;
pub mod transform;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_value::{config_tree, ConfigTree, ConfigValue, DisplayTree, FloatKey, Key};
pub use errors::{ConfigError, ConfigFileError, Result};
pub use store::{ConfigStore, DEFAULT_ENVIRONMENT};
