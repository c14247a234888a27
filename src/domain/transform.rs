// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key transformations over configuration trees.
//!
//! The deep variants walk the whole structure: every mapping key at any depth is
//! passed through the transformation, sequences are descended element by element
//! and scalars are left untouched. The shallow variants only rewrite the keys of
//! the mapping they are given.
//!
//! Each transformation has a variant returning a new structure and an `_in_place`
//! variant that rewrites the structure it owns. Both visit entries in insertion
//! order and produce identical results. When two keys map to the same new key,
//! the value of the later-inserted one wins and the entry keeps the position of
//! the earlier one.
//!
//! # Examples
//!
//! ```
//! use envcfg::domain::config_value::{config_tree, ConfigValue, Key};
//! use envcfg::domain::transform::deep_symbolize_keys;
//! use envcfg::domain::ConfigKey;
//!
//! let raw = config_tree([("person", ConfigValue::mapping([("name", "Rob")]))]);
//! let tree = deep_symbolize_keys(&raw);
//!
//! let person = tree[&Key::from(ConfigKey::from("person"))].as_mapping().unwrap();
//! assert_eq!(person[&Key::from(ConfigKey::from("name"))], ConfigValue::from("Rob"));
//! ```

use crate::domain::config_value::{ConfigTree, ConfigValue, Key};
use crate::domain::errors::{ConfigError, Result};
use std::mem;

/// Returns a new tree with every key, at every depth, passed through `f`.
pub fn deep_transform_keys<F>(tree: &ConfigTree, mut f: F) -> ConfigTree
where
    F: FnMut(Key) -> Key,
{
    transform_tree(tree, &mut f)
}

/// Returns a new value with every mapping key, at every depth, passed through `f`.
///
/// Scalars are returned unchanged.
pub fn deep_transform_value_keys<F>(value: &ConfigValue, mut f: F) -> ConfigValue
where
    F: FnMut(Key) -> Key,
{
    transform_value(value, &mut f)
}

/// Passes every key of `tree`, at every depth, through `f` without copying values.
pub fn deep_transform_keys_in_place<F>(tree: &mut ConfigTree, mut f: F)
where
    F: FnMut(Key) -> Key,
{
    transform_tree_in_place(tree, &mut f)
}

/// Converts every textual key, at every depth, to a symbol.
pub fn deep_symbolize_keys(tree: &ConfigTree) -> ConfigTree {
    deep_transform_keys(tree, Key::symbolize)
}

/// In-place variant of [`deep_symbolize_keys`].
pub fn deep_symbolize_keys_in_place(tree: &mut ConfigTree) {
    deep_transform_keys_in_place(tree, Key::symbolize)
}

/// Converts every key, at every depth, to a plain string.
pub fn deep_stringify_keys(tree: &ConfigTree) -> ConfigTree {
    deep_transform_keys(tree, Key::stringify)
}

/// In-place variant of [`deep_stringify_keys`].
pub fn deep_stringify_keys_in_place(tree: &mut ConfigTree) {
    deep_transform_keys_in_place(tree, Key::stringify)
}

/// Returns a new tree with the top-level keys passed through `f`. Values are cloned
/// as they are.
pub fn transform_keys<F>(tree: &ConfigTree, mut f: F) -> ConfigTree
where
    F: FnMut(Key) -> Key,
{
    tree.iter()
        .map(|(key, value)| (f(key.clone()), value.clone()))
        .collect()
}

/// Passes the top-level keys of `tree` through `f`.
pub fn transform_keys_in_place<F>(tree: &mut ConfigTree, mut f: F)
where
    F: FnMut(Key) -> Key,
{
    for (key, value) in mem::take(tree) {
        tree.insert(f(key), value);
    }
}

/// Converts the top-level textual keys to symbols.
pub fn symbolize_keys(tree: &ConfigTree) -> ConfigTree {
    transform_keys(tree, Key::symbolize)
}

/// Converts the top-level keys to plain strings.
pub fn stringify_keys(tree: &ConfigTree) -> ConfigTree {
    transform_keys(tree, Key::stringify)
}

/// Checks that every top-level key of `tree` is one of `valid`.
///
/// Keys are compared as they are: a string key does not match a symbol.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidKey`] naming the first key outside of `valid`.
///
/// # Examples
///
/// ```
/// use envcfg::domain::config_value::{config_tree, Key};
/// use envcfg::domain::transform::assert_valid_keys;
///
/// let tree = config_tree([("name", "Rob"), ("years", "28")]);
/// let result = assert_valid_keys(&tree, &[Key::from("name"), Key::from("age")]);
/// assert!(result.is_err());
/// ```
pub fn assert_valid_keys(tree: &ConfigTree, valid: &[Key]) -> Result<()> {
    match tree.keys().find(|key| !valid.contains(key)) {
        Some(key) => Err(ConfigError::InvalidKey {
            key: key.to_string(),
            valid: valid
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }),
        None => Ok(()),
    }
}

fn transform_tree<F>(tree: &ConfigTree, f: &mut F) -> ConfigTree
where
    F: FnMut(Key) -> Key,
{
    let mut result = ConfigTree::new();
    for (key, value) in tree {
        let key = f(key.clone());
        let value = transform_value(value, f);
        result.insert(key, value);
    }
    result
}

fn transform_value<F>(value: &ConfigValue, f: &mut F) -> ConfigValue
where
    F: FnMut(Key) -> Key,
{
    match value {
        ConfigValue::Mapping(map) => ConfigValue::Mapping(transform_tree(map, f)),
        ConfigValue::Sequence(items) => {
            ConfigValue::Sequence(items.iter().map(|item| transform_value(item, f)).collect())
        }
        scalar => scalar.clone(),
    }
}

// Entries are moved out before any key is rewritten, so the map is never mutated
// while it is being iterated.
fn transform_tree_in_place<F>(tree: &mut ConfigTree, f: &mut F)
where
    F: FnMut(Key) -> Key,
{
    for (key, mut value) in mem::take(tree) {
        let key = f(key);
        transform_value_in_place(&mut value, f);
        tree.insert(key, value);
    }
}

fn transform_value_in_place<F>(value: &mut ConfigValue, f: &mut F)
where
    F: FnMut(Key) -> Key,
{
    match value {
        ConfigValue::Mapping(map) => transform_tree_in_place(map, f),
        ConfigValue::Sequence(items) => {
            for item in items.iter_mut() {
                transform_value_in_place(item, f);
            }
        }
        _ => {}
    }
}
