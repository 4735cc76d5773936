use crate::flat::FlatConfig;

/// Format flattened pairs as `key = value` lines in key order.
pub fn format_raw(config: &FlatConfig) -> String {
    config
        .iter()
        .map(|(key, value)| format!("{key} = {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
