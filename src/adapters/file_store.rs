// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed configuration store adapter.
//!
//! This module provides a store that loads its tree from a configuration file.
//! The file is looked up as given first, then relative to the user's home
//! directory. The document is decoded once, at construction; later writes through
//! [`ConfigStore::set`] only change the in-memory tree.

use crate::domain::transform::deep_symbolize_keys_in_place;
use crate::domain::{ConfigFileError, ConfigKey, ConfigStore, ConfigTree, ConfigValue, Result};
use crate::ports::ConfigParser;
use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed size for configuration files (10MB)
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Locates a configuration file.
///
/// Returns `path` if it names an existing file, otherwise `path` joined onto the
/// home directory if that names an existing file, otherwise `None`.
pub fn resolve_config_path(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    let base_dirs = BaseDirs::new()?;
    let candidate = base_dirs.home_dir().join(path);
    tracing::trace!(
        requested = %path.display(),
        candidate = %candidate.display(),
        "configuration file not found as given, trying home directory"
    );
    candidate.is_file().then_some(candidate)
}

/// Configuration store loaded from a file.
///
/// # Examples
///
/// ```rust,no_run
/// use envcfg::prelude::*;
///
/// # fn main() -> Result<()> {
/// // Looks for ./app.yml, then ~/app.yml
/// let store = FileConfigStore::open_with_environment("app.yml", "production")?;
/// let host = store.get_str("host")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FileConfigStore {
    /// Path the tree was loaded from
    path: PathBuf,
    /// Canonicalized configuration tree
    tree: ConfigTree,
    /// Section searched first
    env: ConfigKey,
}

impl FileConfigStore {
    /// Loads a YAML file using the `default` environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigFileError`] if the file cannot be found, read or decoded,
    /// or if it is empty.
    #[cfg(feature = "yaml")]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_environment(path, ConfigKey::default_environment())
    }

    /// Loads a YAML file using environment `env`.
    ///
    /// # Errors
    ///
    /// See [`FileConfigStore::open`].
    #[cfg(feature = "yaml")]
    pub fn open_with_environment<P: AsRef<Path>>(path: P, env: impl Into<ConfigKey>) -> Result<Self> {
        Self::open_with_parser(path, env, &crate::adapters::YamlParser::new())
    }

    /// Loads a file with a custom parser using environment `env`.
    ///
    /// # Errors
    ///
    /// See [`FileConfigStore::open`].
    pub fn open_with_parser<P, C>(path: P, env: impl Into<ConfigKey>, parser: &C) -> Result<Self>
    where
        P: AsRef<Path>,
        C: ConfigParser + ?Sized,
    {
        let requested = path.as_ref();
        let path = resolve_config_path(requested).ok_or_else(|| ConfigFileError::NotFound {
            path: requested.to_path_buf(),
        })?;

        if !parser.supports_path(&path) {
            tracing::debug!(
                path = %path.display(),
                extensions = ?parser.supported_extensions(),
                "configuration file extension not recognized by parser, parsing anyway"
            );
        }

        let content = read_config_file(&path)?;
        let parsed = parser.parse(&content).map_err(|source| ConfigFileError::Parse {
            path: path.clone(),
            source,
        })?;

        let mut tree = match parsed {
            None | Some(ConfigValue::Bool(false)) => {
                return Err(ConfigFileError::Empty { path }.into())
            }
            Some(ConfigValue::Mapping(tree)) => tree,
            Some(other) => {
                return Err(ConfigFileError::NotAMapping {
                    path,
                    found: other.kind(),
                }
                .into())
            }
        };
        deep_symbolize_keys_in_place(&mut tree);

        let env = env.into();
        tracing::debug!(
            path = %path.display(),
            env = %env,
            entries = tree.len(),
            "loaded configuration file"
        );

        Ok(Self { path, tree, env })
    }

    /// Returns the path the configuration was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes the store, returning its tree.
    pub fn into_tree(self) -> ConfigTree {
        self.tree
    }
}

fn read_config_file(path: &Path) -> std::result::Result<String, ConfigFileError> {
    let metadata = fs::metadata(path).map_err(|source| ConfigFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigFileError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: MAX_CONFIG_FILE_SIZE,
        });
    }

    fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl ConfigStore for FileConfigStore {
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
        tracing::debug!(env = %self.env, path = %self.path.display(), "switched configuration environment");
    }
}

#[cfg(all(test, feature = "yaml"))]
mod tests {
    use super::*;
    use crate::domain::{ConfigError, Key};
    use crate::ports::ParseError;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn yaml_file(content: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(".yml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_file_store_open() {
        let file = yaml_file("default:\n  host: localhost\nproduction:\n  host: db.example.com\n");

        let store = FileConfigStore::open(file.path()).unwrap();
        assert_eq!(store.get_str("host").unwrap(), "localhost");
        assert_eq!(store.path(), file.path());
    }

    #[test]
    fn test_file_store_environment() {
        let file = yaml_file("default:\n  host: localhost\nproduction:\n  host: db.example.com\n");

        let mut store = FileConfigStore::open_with_environment(file.path(), "production").unwrap();
        assert_eq!(store.get_str("host").unwrap(), "db.example.com");

        store.set_environment("development");
        assert_eq!(store.get_str("host").unwrap(), "localhost");
    }

    #[test]
    fn test_file_store_symbolizes_nested_keys() {
        let file = yaml_file("default:\n  database:\n    port: 5432\n");

        let store = FileConfigStore::open(file.path()).unwrap();
        let database = store.get("database").unwrap().as_mapping().unwrap();
        assert_eq!(
            database[&Key::from(ConfigKey::from("port"))],
            ConfigValue::from(5432)
        );
    }

    #[test]
    fn test_file_store_not_found_names_requested_path() {
        let err = FileConfigStore::open("envcfg-surely-missing-config.yml").unwrap_err();
        match &err {
            ConfigError::File(ConfigFileError::NotFound { path }) => {
                assert_eq!(path, Path::new("envcfg-surely-missing-config.yml"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("envcfg-surely-missing-config.yml"));
    }

    #[test]
    fn test_file_store_empty_file() {
        let file = yaml_file("");
        let err = FileConfigStore::open(file.path()).unwrap_err();
        assert!(matches!(
            err.as_file_error(),
            Some(ConfigFileError::Empty { .. })
        ));
        assert!(err.to_string().contains("is empty!"));
    }

    #[test]
    fn test_file_store_null_document() {
        let file = yaml_file("null\n");
        let err = FileConfigStore::open(file.path()).unwrap_err();
        assert!(matches!(
            err.as_file_error(),
            Some(ConfigFileError::Empty { .. })
        ));
    }

    #[test]
    fn test_file_store_false_document_is_empty() {
        let file = yaml_file("false\n");
        let err = FileConfigStore::open(file.path()).unwrap_err();
        assert!(matches!(
            err.as_file_error(),
            Some(ConfigFileError::Empty { .. })
        ));
        assert!(err.to_string().ends_with("is empty!"));
    }

    #[test]
    fn test_file_store_true_document_is_not_a_mapping() {
        let file = yaml_file("true\n");
        let err = FileConfigStore::open(file.path()).unwrap_err();
        assert!(matches!(
            err.as_file_error(),
            Some(ConfigFileError::NotAMapping { found: "boolean", .. })
        ));
    }

    #[test]
    fn test_file_store_reads_first_document() {
        let file = yaml_file("default:\n  a: 1\n---\ndefault:\n  a: 2\n");
        let store = FileConfigStore::open(file.path()).unwrap();
        assert_eq!(store.get_i64("a").unwrap(), 1);
    }

    #[test]
    fn test_file_store_sequence_root() {
        let file = yaml_file("- a\n- b\n");
        let err = FileConfigStore::open(file.path()).unwrap_err();
        assert!(matches!(
            err.as_file_error(),
            Some(ConfigFileError::NotAMapping {
                found: "sequence",
                ..
            })
        ));
    }

    #[test]
    fn test_file_store_malformed_document() {
        let file = yaml_file("invalid: yaml: content:");
        let err = FileConfigStore::open(file.path()).unwrap_err();
        assert!(matches!(
            err.as_file_error(),
            Some(ConfigFileError::Parse { .. })
        ));
    }

    #[test]
    fn test_file_store_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileConfigStore::open(dir.path()).unwrap_err();
        assert!(matches!(
            err.as_file_error(),
            Some(ConfigFileError::NotFound { .. })
        ));
    }

    #[test]
    fn test_file_store_set_is_in_memory_only() {
        let file = yaml_file("default:\n  a: 1\n");
        let mut store = FileConfigStore::open(file.path()).unwrap();

        store.set_in("x", 5, "staging");
        store.set_environment("staging");
        assert_eq!(store.get_i64("x").unwrap(), 5);

        let on_disk = fs::read_to_string(file.path()).unwrap();
        assert_eq!(on_disk, "default:\n  a: 1\n");
    }

    struct KeyValueParser;

    impl ConfigParser for KeyValueParser {
        fn parse(&self, content: &str) -> std::result::Result<Option<ConfigValue>, ParseError> {
            let entries: Vec<(String, String)> = content
                .lines()
                .filter_map(|line| line.split_once('='))
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .collect();
            if entries.is_empty() {
                return Ok(None);
            }
            Ok(Some(ConfigValue::mapping(entries)))
        }

        fn supported_extensions(&self) -> &[&str] {
            &["kv"]
        }
    }

    #[test]
    fn test_file_store_custom_parser() {
        let mut file = Builder::new().suffix(".kv").tempfile().unwrap();
        write!(file, "host = localhost\nport = 80\n").unwrap();

        let store = FileConfigStore::open_with_parser(file.path(), "default", &KeyValueParser).unwrap();
        assert_eq!(store.get_str("host").unwrap(), "localhost");
        assert_eq!(store.get_str("port").unwrap(), "80");
    }
}
