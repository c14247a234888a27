// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! [`ConfigError`] is the error every operation returns. Failures to locate or load
//! a configuration file are described by the more specific [`ConfigFileError`],
//! carried inside [`ConfigError::File`], so callers can handle either the generic
//! error or only the file case.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// # Examples
///
/// ```
/// use envcfg::domain::errors::ConfigError;
///
/// let error = ConfigError::MissingEntry { key: "database".to_string() };
/// assert_eq!(error.to_string(), "Missing required configuration entry for database");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No section of the tree holds the key and no default was supplied.
    #[error("Missing required configuration entry for {key}")]
    MissingEntry {
        /// The key that was not found
        key: String,
    },

    /// The key resolved to a value of another kind than the one requested.
    #[error("Configuration entry {key} has type {found}, expected {expected}")]
    TypeMismatch {
        /// The key that was resolved
        key: String,
        /// The kind of value requested
        expected: &'static str,
        /// The kind of value found
        found: &'static str,
    },

    /// A mapping holds a key outside of the allowed set.
    #[error("Unknown key: {key}. Valid keys are: {valid}")]
    InvalidKey {
        /// The offending key
        key: String,
        /// The allowed keys, comma separated
        valid: String,
    },

    /// A configuration file could not be located or loaded.
    #[error(transparent)]
    File(#[from] ConfigFileError),
}

impl ConfigError {
    /// Returns the file error if this error came from loading a file.
    pub fn as_file_error(&self) -> Option<&ConfigFileError> {
        match self {
            ConfigError::File(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if this error came from loading a file.
    pub fn is_file_error(&self) -> bool {
        self.as_file_error().is_some()
    }
}

/// Errors raised while locating or loading a configuration file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigFileError {
    /// The file exists neither as given nor under the home directory.
    #[error("Configuration file {} not found", .path.display())]
    NotFound {
        /// The path as it was requested
        path: PathBuf,
    },

    /// The file holds an empty, null or `false` document.
    #[error("Configuration file {} is empty!", .path.display())]
    Empty {
        /// The resolved path of the file
        path: PathBuf,
    },

    /// The document's root is not a mapping.
    #[error("Configuration file {} must contain a mapping, found {found}", .path.display())]
    NotAMapping {
        /// The resolved path of the file
        path: PathBuf,
        /// The kind of value found at the root
        found: &'static str,
    },

    /// The file exceeds the size limit.
    #[error("Configuration file {} too large: {size} bytes (max {max} bytes)", .path.display())]
    TooLarge {
        /// The resolved path of the file
        path: PathBuf,
        /// The size of the file in bytes
        size: u64,
        /// The size limit in bytes
        max: u64,
    },

    /// The document could not be decoded.
    #[error("Failed to parse configuration file {}: {source}", .path.display())]
    Parse {
        /// The resolved path of the file
        path: PathBuf,
        /// The underlying decoder error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The file could not be read.
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Io {
        /// The resolved path of the file
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

impl ConfigFileError {
    /// Returns the path the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ConfigFileError::NotFound { path }
            | ConfigFileError::Empty { path }
            | ConfigFileError::NotAMapping { path, .. }
            | ConfigFileError::TooLarge { path, .. }
            | ConfigFileError::Parse { path, .. }
            | ConfigFileError::Io { path, .. } => path,
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
