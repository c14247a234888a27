// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests check the deep key transformations and the resolution order over
//! arbitrary configuration trees.

use envcfg::domain::transform::{
    deep_stringify_keys, deep_symbolize_keys, deep_symbolize_keys_in_place, deep_transform_keys,
};
use envcfg::prelude::*;
use proptest::prelude::*;

fn arb_key() -> BoxedStrategy<Key> {
    prop_oneof![
        6 => arb_text_key(),
        1 => any::<i64>().prop_map(Key::Integer),
        1 => (-1.0e6..1.0e6f64).prop_map(Key::from),
        1 => any::<bool>().prop_map(Key::Bool),
    ]
    .boxed()
}

fn arb_text_key() -> BoxedStrategy<Key> {
    prop_oneof![
        2 => "[a-z_]{1,8}".prop_map(Key::from),
        1 => "[a-z_]{1,8}".prop_map(|s| Key::from(ConfigKey::from(s))),
    ]
    .boxed()
}

fn arb_scalar() -> impl Strategy<Value = ConfigValue> {
    prop_oneof![
        Just(ConfigValue::Null),
        any::<bool>().prop_map(ConfigValue::Bool),
        any::<i64>().prop_map(ConfigValue::Integer),
        "\\PC{0,12}".prop_map(ConfigValue::String),
    ]
}

fn arb_value() -> impl Strategy<Value = ConfigValue> {
    arb_value_with(arb_key)
}

fn arb_value_with(keys: fn() -> BoxedStrategy<Key>) -> impl Strategy<Value = ConfigValue> {
    arb_scalar().prop_recursive(4, 48, 6, move |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(ConfigValue::Sequence),
            arb_tree_with(keys(), inner, 0..6).prop_map(ConfigValue::Mapping),
        ]
    })
}

/// Trees built from generated entries in generation order.
fn arb_tree_with<V>(
    keys: BoxedStrategy<Key>,
    values: V,
    size: std::ops::Range<usize>,
) -> impl Strategy<Value = ConfigTree>
where
    V: Strategy<Value = ConfigValue>,
{
    prop::collection::vec((keys, values), size).prop_map(config_tree)
}

fn arb_tree() -> impl Strategy<Value = ConfigTree> {
    arb_tree_with(arb_key(), arb_value(), 0..8)
}

/// Sequence lengths and mapping sizes, in traversal order.
fn shape(value: &ConfigValue, out: &mut Vec<(char, usize)>) {
    match value {
        ConfigValue::Sequence(items) => {
            out.push(('s', items.len()));
            for item in items {
                shape(item, out);
            }
        }
        ConfigValue::Mapping(map) => {
            out.push(('m', map.len()));
            for item in map.values() {
                shape(item, out);
            }
        }
        _ => out.push(('x', 0)),
    }
}

fn all_keys_canonical(tree: &ConfigTree) -> bool {
    tree.iter().all(|(key, value)| {
        !matches!(key, Key::String(_)) && value_keys_canonical(value)
    })
}

fn value_keys_canonical(value: &ConfigValue) -> bool {
    match value {
        ConfigValue::Mapping(map) => all_keys_canonical(map),
        ConfigValue::Sequence(items) => items.iter().all(value_keys_canonical),
        _ => true,
    }
}

/// Keys that stay distinct when converted to symbols.
fn symbolizes_without_collisions(tree: &ConfigTree) -> bool {
    let mut seen = std::collections::BTreeSet::new();
    tree.keys().all(|key| seen.insert(key.clone().symbolize()))
        && tree.values().all(value_symbolizes_without_collisions)
}

fn value_symbolizes_without_collisions(value: &ConfigValue) -> bool {
    match value {
        ConfigValue::Mapping(map) => symbolizes_without_collisions(map),
        ConfigValue::Sequence(items) => items.iter().all(value_symbolizes_without_collisions),
        _ => true,
    }
}

// Identity transformation returns an equal tree
proptest! {
    #[test]
    fn test_identity_transform_is_deep_equal(tree in arb_tree()) {
        prop_assert_eq!(deep_transform_keys(&tree, |key| key), tree);
    }
}

// Symbolizing leaves no plain string keys at any depth
proptest! {
    #[test]
    fn test_symbolize_canonicalizes_every_key(tree in arb_tree()) {
        prop_assert!(all_keys_canonical(&deep_symbolize_keys(&tree)));
    }
}

// Shape is preserved when no keys collide
proptest! {
    #[test]
    fn test_symbolize_preserves_shape(tree in arb_tree()) {
        prop_assume!(symbolizes_without_collisions(&tree));

        let mut before = Vec::new();
        shape(&ConfigValue::Mapping(tree.clone()), &mut before);
        let mut after = Vec::new();
        shape(&ConfigValue::Mapping(deep_symbolize_keys(&tree)), &mut after);

        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }
}

// The in-place variant matches the copying one, entry order included
proptest! {
    #[test]
    fn test_in_place_matches_copy(tree in arb_tree()) {
        let copied = deep_symbolize_keys(&tree);
        let mut in_place = tree;
        deep_symbolize_keys_in_place(&mut in_place);
        prop_assert!(in_place.iter().eq(copied.iter()));
        prop_assert_eq!(in_place, copied);
    }
}

// Keys keep their insertion order when none collide
proptest! {
    #[test]
    fn test_symbolize_keeps_key_order(tree in arb_tree()) {
        prop_assume!(symbolizes_without_collisions(&tree));

        let expected: Vec<Key> = tree.keys().cloned().map(Key::symbolize).collect();
        let symbolized = deep_symbolize_keys(&tree);
        prop_assert_eq!(symbolized.keys().cloned().collect::<Vec<_>>(), expected);
    }
}

// Stringify then symbolize restores symbolized keys
proptest! {
    #[test]
    fn test_stringify_symbolize_round_trip(
        tree in arb_tree_with(arb_text_key(), arb_value_with(arb_text_key), 0..8)
    ) {
        let tree = deep_symbolize_keys(&tree);
        prop_assert_eq!(deep_symbolize_keys(&deep_stringify_keys(&tree)), tree);
    }
}

// The environment section always wins
proptest! {
    #[test]
    fn test_environment_tier_wins(
        key in "[a-z]{1,8}",
        env_value in any::<i64>(),
        default_value in any::<i64>(),
        top_value in any::<i64>(),
    ) {
        prop_assume!(key != "production" && key != "default");
        let store = MemoryConfigStore::with_environment(
            config_tree([
                ("production", ConfigValue::mapping([(key.as_str(), env_value)])),
                ("default", ConfigValue::mapping([(key.as_str(), default_value)])),
            ])
            .into_iter()
            .chain([(Key::from(key.as_str()), ConfigValue::from(top_value))])
            .collect(),
            "production",
        );
        prop_assert_eq!(store.get_i64(key.as_str()).unwrap(), env_value);
    }
}

// Supplied defaults come back exactly when nothing matches
proptest! {
    #[test]
    fn test_default_returned_exactly(default in arb_value()) {
        let store = MemoryConfigStore::new(config_tree([("default", ConfigValue::mapping([("a", 1)]))]));
        prop_assert_eq!(store.get_or("absent", default.clone()), default.clone());
        prop_assert_eq!(store.fetch("absent", Some(default.clone())).unwrap(), default);
    }
}
