//! Flattened configuration store and its hierarchical view.

use std::collections::{BTreeMap, HashSet};
use std::fmt::{self, Debug, Formatter};

use crate::path::KEY_DELIMITER;

/// Ordered, case-insensitive mapping from flattened key to string value.
///
/// Keys are ordered by their upper-cased form (ordinal ignore-case, one
/// character at a time). The casing of the first write to a key is the one kept.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FlatConfig {
    entries: BTreeMap<String, FlatEntry>,
}

#[derive(Clone, PartialEq, Eq)]
struct FlatEntry {
    key: String,
    value: String,
}

/// Upper-case each character on its own. Characters whose upper case is
/// more than one character (`ß`) are kept as they are.
fn fold(key: &str) -> String {
    key.chars()
        .map(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(single), None) => single,
                _ => c,
            }
        })
        .collect()
}

impl FlatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace a value, returning the previous value if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.get_mut(&fold(&key)) {
            Some(entry) => Some(std::mem::replace(&mut entry.value, value)),
            None => {
                self.entries.insert(fold(&key), FlatEntry { key, value });
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&fold(key)).map(|entry| entry.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&fold(key))
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(&fold(key)).map(|entry| entry.value)
    }

    /// Remove every key starting with `prefix` (case-insensitive). Returns the number removed.
    pub fn remove_prefixed(&mut self, prefix: &str) -> usize {
        let folded = fold(prefix);
        let doomed: Vec<String> = self
            .entries
            .range(folded.clone()..)
            .take_while(|(key, _)| key.starts_with(&folded))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &doomed {
            self.entries.remove(key);
        }
        doomed.len()
    }

    /// Iterate `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|entry| (entry.key.as_str(), entry.value.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|entry| entry.key.as_str())
    }

    /// Hierarchical view rooted above every key.
    pub fn root(&self) -> ConfigSection<'_> {
        ConfigSection {
            config: self,
            path: String::new(),
        }
    }

    /// Hierarchical view at `path`. The section may be empty.
    pub fn section(&self, path: impl Into<String>) -> ConfigSection<'_> {
        ConfigSection {
            config: self,
            path: path.into(),
        }
    }
}

impl Debug for FlatConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for FlatConfig
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = FlatConfig::new();
        for (key, value) in iter {
            config.insert(key, value);
        }
        config
    }
}

/// A node of the tree implied by shared key prefixes in a [`FlatConfig`].
///
/// Nothing is materialized: children are recomputed from the flat keys on
/// every call.
#[derive(Debug, Clone)]
pub struct ConfigSection<'a> {
    config: &'a FlatConfig,
    path: String,
}

impl<'a> ConfigSection<'a> {
    /// Full flattened path of this section; empty for the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment; empty for the root.
    pub fn key(&self) -> &str {
        self.path
            .rsplit(KEY_DELIMITER)
            .next()
            .unwrap_or_default()
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Value stored at exactly this path.
    pub fn value(&self) -> Option<&'a str> {
        if self.is_root() {
            return None;
        }
        self.config.get(&self.path)
    }

    /// Direct children, deduplicated case-insensitively, in key order.
    pub fn children(&self) -> Vec<ConfigSection<'a>> {
        let (prefix, depth) = if self.is_root() {
            (String::new(), 0)
        } else {
            (
                fold(&format!("{}{}", self.path, KEY_DELIMITER)),
                self.path.split(KEY_DELIMITER).count(),
            )
        };

        let mut seen = HashSet::new();
        let mut children = Vec::new();
        for (_, entry) in self
            .config
            .entries
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
        {
            let Some(segment) = entry.key.split(KEY_DELIMITER).nth(depth) else {
                continue;
            };
            if !seen.insert(fold(segment)) {
                continue;
            }

            let path = if self.is_root() {
                segment.to_string()
            } else {
                format!("{}{}{}", self.path, KEY_DELIMITER, segment)
            };
            children.push(ConfigSection {
                config: self.config,
                path,
            });
        }
        children
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::FlatConfig;

    #[test]
    fn keys_are_case_insensitive_and_keep_first_casing() {
        let mut config = FlatConfig::new();
        assert_eq!(config.insert("AppSettings:Mode", "a"), None);
        assert_eq!(config.insert("appsettings:MODE", "b"), Some("a".to_string()));

        assert_eq!(config.len(), 1);
        assert_eq!(config.get("APPSETTINGS:mode"), Some("b"));
        assert_eq!(config.keys().collect::<Vec<_>>(), vec!["AppSettings:Mode"]);
    }

    #[test]
    fn folding_never_expands_a_character() {
        let mut config = FlatConfig::new();
        config.insert("Straße", "a");
        config.insert("STRASSE", "b");
        config.insert("straße", "c");

        assert_eq!(config.len(), 2);
        assert_eq!(config.get("STRAßE"), Some("c"));
        assert_eq!(config.get("strasse"), Some("b"));

        config.remove_prefixed("STRASS");
        assert_eq!(config.keys().collect::<Vec<_>>(), vec!["Straße"]);
    }

    #[test]
    fn iteration_is_ordinal_ignore_case() {
        let config: FlatConfig = [("b", "1"), ("A_x", "2"), ("a", "3"), ("Ab", "4")]
            .into_iter()
            .collect();

        // '_' sorts after letters once keys are upper-cased.
        assert_eq!(config.keys().collect::<Vec<_>>(), vec!["a", "Ab", "A_x", "b"]);
    }

    #[test]
    fn remove_prefixed_only_touches_matching_keys() {
        let mut config: FlatConfig = [("a:b", "1"), ("a:b:c", "2"), ("a:bc", "3"), ("A:B:d", "4")]
            .into_iter()
            .collect();

        let removed = config.remove_prefixed("a:b:");

        assert_eq!(removed, 2);
        assert_eq!(config.keys().collect::<Vec<_>>(), vec!["a:b", "a:bc"]);
    }

    #[test]
    fn sections_group_children_case_insensitively() {
        let config: FlatConfig = [("Logging:Level", "Info"), ("logging:sink:0", "file")]
            .into_iter()
            .collect();

        let root = config.root();
        let top = root.children();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].key(), "Logging");

        let keys: Vec<String> = top[0]
            .children()
            .iter()
            .map(|child| child.key().to_string())
            .collect();
        assert_eq!(keys, vec!["Level", "sink"]);
        assert_eq!(top[0].children()[0].value(), Some("Info"));
    }

    #[test]
    fn section_does_not_treat_longer_siblings_as_children() {
        let config: FlatConfig = [("list", "x"), ("listing:a", "y")].into_iter().collect();

        assert!(!config.section("list").has_children());
        assert_eq!(config.section("list").value(), Some("x"));
    }
}
