//! Key lookup over a parsed YAML document.

use serde_yaml::Value;

/// Walk `key` (`/`-delimited) from `root`.
///
/// Segments index mappings by string key. On a sequence, `@N` selects the
/// N-th element and `@last` the final one. Null nodes count as absent.
pub fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    let mut node = root;
    if !key.is_empty() {
        for segment in key.split('/') {
            node = step(node, segment)?;
        }
    }
    if node.is_null() {
        None
    } else {
        Some(node)
    }
}

fn step<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Mapping(map) => map.get(segment),
        Value::Sequence(seq) => match segment.strip_prefix('@')? {
            "last" => seq.last(),
            index => seq.get(index.parse::<usize>().ok()?),
        },
        _ => None,
    }
}

/// Booleans, plus the strings `"true"` and `"false"`.
pub fn scalar_to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Any scalar rendered as text. Collections and null have no string form.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
