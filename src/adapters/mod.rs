// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing configuration store and parser implementations.
//!
//! This module contains the concrete stores implementing the `ConfigStore` trait
//! from the domain layer, and the document parsers implementing the
//! `ConfigParser` trait from the ports layer.

pub mod file_store;
pub mod memory_store;
#[cfg(feature = "yaml")]
pub mod yaml;

// Re-export adapters based on feature flags
pub use file_store::{resolve_config_path, FileConfigStore};
pub use memory_store::MemoryConfigStore;
#[cfg(feature = "yaml")]
pub use yaml::YamlParser;
