//! Rebuild nested JSON from a [`FlatConfig`].
//!
//! A node whose child segments are all non-negative 32-bit integers becomes
//! an array ordered by numeric value; anything else becomes an object. Gaps in
//! the numbering are collapsed. A map whose keys merely look numeric is
//! still emitted as an array.

use serde_json::{Map, Value};

use crate::flat::{ConfigSection, FlatConfig};

/// Reconstruct the whole store. An empty store yields `{}`.
pub fn reconstruct(config: &FlatConfig) -> Value {
    let root = config.root();
    if !root.has_children() {
        return Value::Object(Map::new());
    }
    reconstruct_section(&root)
}

/// Reconstruct the subtree rooted at `section`.
pub fn reconstruct_section(section: &ConfigSection<'_>) -> Value {
    let children = section.children();
    if children.is_empty() {
        return section
            .value()
            .map_or(Value::Null, |value| Value::String(value.to_string()));
    }

    let indexed: Option<Vec<(i32, &ConfigSection<'_>)>> = children
        .iter()
        .map(|child| array_index(child.key()).map(|index| (index, child)))
        .collect();

    match indexed {
        Some(mut items) => {
            items.sort_by_key(|(index, _)| *index);
            Value::Array(
                items
                    .into_iter()
                    .map(|(_, child)| reconstruct_section(child))
                    .collect(),
            )
        }
        None => {
            let mut members = Map::new();
            for child in &children {
                members.insert(child.key().to_string(), reconstruct_section(child));
            }
            Value::Object(members)
        }
    }
}

fn array_index(segment: &str) -> Option<i32> {
    segment.parse::<i32>().ok().filter(|index| *index >= 0)
}

/// Wrap `value` as the only member of an object named `namespace`, when one is given.
pub fn wrap_namespace(value: Value, namespace: Option<&str>) -> Value {
    match namespace {
        Some(name) if !name.is_empty() => {
            let mut wrapper = Map::new();
            wrapper.insert(name.to_string(), value);
            Value::Object(wrapper)
        }
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{reconstruct, wrap_namespace};
    use crate::flat::FlatConfig;

    fn flat(pairs: &[(&str, &str)]) -> FlatConfig {
        pairs.iter().copied().collect()
    }

    #[test]
    fn numeric_children_become_arrays() {
        let value = reconstruct(&flat(&[("list:0", "x"), ("list:1", "y")]));
        assert_eq!(value, json!({ "list": ["x", "y"] }));
    }

    #[test]
    fn gaps_are_collapsed_and_order_is_numeric() {
        let value = reconstruct(&flat(&[("list:10", "c"), ("list:2", "b"), ("list:0", "a")]));
        assert_eq!(value, json!({ "list": ["a", "b", "c"] }));

        let gapped = reconstruct(&flat(&[("list:0", "x"), ("list:2", "y")]));
        assert_eq!(gapped, json!({ "list": ["x", "y"] }));
    }

    #[test]
    fn object_members_follow_sorted_key_order() {
        let value = reconstruct(&flat(&[("a:foo", "1"), ("a:bar", "2")]));
        assert_eq!(value, json!({ "a": { "bar": "2", "foo": "1" } }));

        let keys: Vec<&String> = value["a"].as_object().expect("object").keys().collect();
        assert_eq!(keys, ["bar", "foo"]);
    }

    #[test]
    fn indices_beyond_i32_stay_an_object() {
        let value = reconstruct(&flat(&[("s:0", "x"), ("s:3000000000", "y")]));
        assert_eq!(value, json!({ "s": { "0": "x", "3000000000": "y" } }));

        let negative = reconstruct(&flat(&[("s:-1", "x"), ("s:1", "y")]));
        assert_eq!(negative, json!({ "s": { "-1": "x", "1": "y" } }));
    }

    #[test]
    fn large_arrays_keep_numeric_order() {
        let config: FlatConfig = (0..40_000)
            .rev()
            .map(|i| (format!("list:{i}"), i.to_string()))
            .collect();

        let value = reconstruct(&config);
        let items = value["list"].as_array().expect("array");
        assert_eq!(items.len(), 40_000);
        assert_eq!(items[0], json!("0"));
        assert_eq!(items[39_999], json!("39999"));
    }

    #[test]
    fn mixed_numeric_and_named_children_stay_an_object() {
        let value = reconstruct(&flat(&[("s:0", "x"), ("s:name", "y")]));
        assert_eq!(value, json!({ "s": { "0": "x", "name": "y" } }));
    }

    #[test]
    fn values_are_never_coerced() {
        let value = reconstruct(&flat(&[("port", "8080"), ("enabled", "true")]));
        assert_eq!(value, json!({ "enabled": "true", "port": "8080" }));
    }

    #[test]
    fn children_shadow_a_scalar_at_the_same_path() {
        let value = reconstruct(&flat(&[("db", "scalar"), ("db:host", "h")]));
        assert_eq!(value, json!({ "db": { "host": "h" } }));
    }

    #[test]
    fn arrays_of_records() {
        let value = reconstruct(&flat(&[
            ("servers:server:0:host", "a"),
            ("servers:server:0:port", "1"),
            ("servers:server:1:host", "b"),
        ]));
        assert_eq!(
            value,
            json!({ "servers": { "server": [ { "host": "a", "port": "1" }, { "host": "b" } ] } })
        );
    }

    #[test]
    fn empty_store_is_an_empty_object() {
        assert_eq!(reconstruct(&FlatConfig::new()), json!({}));
    }

    #[test]
    fn namespace_wraps_only_when_non_empty() {
        let value = json!({ "A": "1" });
        assert_eq!(
            wrap_namespace(value.clone(), Some("Legacy")),
            json!({ "Legacy": { "A": "1" } })
        );
        assert_eq!(wrap_namespace(value.clone(), Some("")), value);
        assert_eq!(wrap_namespace(value.clone(), None), value);
    }
}
