//! `add`/`remove`/`clear` element conventions.
//!
//! A [`ShapeRule`] recognizes an element whose children are all mutation
//! entries and replays them against a [`FlatConfig`]:
//!
//! ```xml
//! <appSettings>
//!   <clear />
//!   <add key="Mode" value="Live" />
//!   <remove key="Legacy" />
//! </appSettings>
//! ```

use serde::{Deserialize, Serialize};

use crate::console::{emit, Console};
use crate::flat::FlatConfig;
use crate::path::{PathContext, KEY_DELIMITER};
use crate::tree::XmlNode;

/// Element and attribute names for one `add`/`remove`/`clear` convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShapeRule {
    /// Attribute naming the entry.
    pub key: String,
    /// Attribute holding a single-valued entry.
    pub value: String,
    pub add: String,
    pub remove: String,
    pub clear: String,
}

impl Default for ShapeRule {
    fn default() -> Self {
        Self {
            key: "key".to_string(),
            value: "value".to_string(),
            add: "add".to_string(),
            remove: "remove".to_string(),
            clear: "clear".to_string(),
        }
    }
}

/// What a child element asks the rule to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
    Clear,
}

impl ShapeRule {
    /// A rule with custom key/value attribute names and default element names.
    pub fn with_attributes(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Rules applied when none are configured, in priority order.
    pub fn defaults() -> Vec<ShapeRule> {
        vec![
            ShapeRule::default(),
            ShapeRule::with_attributes("name", "connectionString"),
            ShapeRule::with_attributes("name", "value"),
        ]
    }

    pub fn action(&self, element_name: &str) -> Option<Action> {
        if element_name == self.add {
            Some(Action::Add)
        } else if element_name == self.remove {
            Some(Action::Remove)
        } else if element_name == self.clear {
            Some(Action::Clear)
        } else {
            None
        }
    }

    /// True when `element` has children and every child is a keyed add/remove or a clear.
    pub fn recognizes(&self, element: &XmlNode) -> bool {
        !element.children.is_empty()
            && element.children.iter().all(|child| match self.action(&child.name) {
                Some(Action::Add | Action::Remove) => child.attribute(&self.key).is_some(),
                Some(Action::Clear) => true,
                None => false,
            })
    }

    /// Replay the children of `element` against `results`.
    ///
    /// `context` must already point at `element`; it is left as it was found.
    pub fn apply(
        &self,
        element: &XmlNode,
        context: &mut PathContext,
        results: &mut FlatConfig,
        console: Option<&dyn Console>,
    ) {
        for child in &element.children {
            let Some(action) = self.action(&child.name) else {
                emit(
                    console,
                    &format!("[{child}] is not supported: unknown element <{}>", child.name),
                );
                continue;
            };

            match action {
                Action::Add => {
                    let Some(key) = self.required_key(child, console) else {
                        continue;
                    };
                    context.push(key);
                    self.add_entry(child, context, results, console);
                    context.pop();
                }
                Action::Remove => {
                    let Some(key) = self.required_key(child, console) else {
                        continue;
                    };
                    let full_key = context.key_for(key);
                    let mut removed = usize::from(results.remove(&full_key).is_some());
                    removed += results.remove_prefixed(&format!("{full_key}{KEY_DELIMITER}"));
                    tracing::debug!(key = %full_key, removed, "remove");
                }
                Action::Clear => {
                    let path = context.path();
                    let mut removed = usize::from(results.remove(&path).is_some());
                    removed += results.remove_prefixed(&format!("{path}{KEY_DELIMITER}"));
                    tracing::debug!(path = %path, removed, "clear");
                }
            }
        }
    }

    fn required_key<'n>(&self, child: &'n XmlNode, console: Option<&dyn Console>) -> Option<&'n str> {
        let key = child.attribute(&self.key);
        if key.is_none() {
            emit(
                console,
                &format!(
                    "[{child}] is not supported because it does not have an attribute with {}",
                    self.key
                ),
            );
        }
        key
    }

    fn add_entry(
        &self,
        child: &XmlNode,
        context: &PathContext,
        results: &mut FlatConfig,
        console: Option<&dyn Console>,
    ) {
        let fields: Vec<_> = child
            .attributes
            .iter()
            .filter(|attr| attr.name != self.key)
            .collect();
        let single_value = match fields.as_slice() {
            [only] if only.name == self.value => Some(only.value.as_str()),
            _ => None,
        };

        match single_value {
            Some(value) => write_entry(results, console, context.path(), value),
            None => {
                for attr in &fields {
                    write_entry(results, console, context.key_for(&attr.name), &attr.value);
                }
            }
        }
    }
}

/// Write `key`, reporting a replaced value on the console.
pub(crate) fn write_entry(
    results: &mut FlatConfig,
    console: Option<&dyn Console>,
    key: String,
    value: &str,
) {
    let line = results
        .get(&key)
        .map(|old| format!("{key} exists. Replacing existing value [{old}] with {value}"));
    results.insert(key, value);
    if let Some(line) = line {
        emit(console, &line);
    }
}
