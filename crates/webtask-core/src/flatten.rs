//! Hierarchical-config flattening
//!
//! Converts an arbitrary JSON value into flat `dotted.key=value` lines, the
//! line-oriented resource-bundle format the server side reads. Also provides
//! the client-side wrapper (a single global assignment of the unflattened
//! document) and extraction of single entries from properties text.

use serde_json::Value;

/// Flatten a JSON value into `dotted.key=value` lines.
///
/// Object entries and array elements recurse with `<prefix><key>.`; scalar
/// leaves emit `<prefix><key>=<value>`. A bare scalar input emits the single
/// line `<prefix>=<value>`. Output order follows document order; recursion
/// depth equals the document's depth.
pub fn flatten(value: &Value, prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    flatten_into(value, prefix, &mut lines);
    lines
}

fn flatten_into(value: &Value, prefix: &str, out: &mut Vec<String>) {
    match value {
        Value::Object(entries) => {
            for (key, child) in entries {
                flatten_child(child, prefix, key, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_child(child, prefix, &index.to_string(), out);
            }
        }
        scalar => out.push(format!("{prefix}={}", scalar_text(scalar))),
    }
}

fn flatten_child(child: &Value, prefix: &str, key: &str, out: &mut Vec<String>) {
    if child.is_object() || child.is_array() {
        flatten_into(child, &format!("{prefix}{key}."), out);
    } else {
        out.push(format!("{prefix}{key}={}", scalar_text(child)));
    }
}

/// Scalar rendering: strings verbatim, numbers and booleans in their JSON
/// form, null as the literal `null`.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Render a document as a properties file: one flattened line per leaf,
/// each terminated by a newline.
pub fn to_properties(value: &Value) -> String {
    flatten(value, "")
        .into_iter()
        .map(|line| line + "\n")
        .collect()
}

/// Wrap a document as a client-side global assignment: `<global> = <json>;`.
pub fn client_bundle(global: &str, value: &Value) -> String {
    format!("{global} = {value};")
}

/// Extract the value of the first `<key>=` line from properties text.
pub fn property_value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    text.lines()
        .find_map(|line| line.strip_prefix(key).and_then(|rest| rest.strip_prefix('=')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_object_and_array() {
        let lines = flatten(&json!({"a": {"b": 1, "c": [2, 3]}}), "");
        assert_eq!(lines, vec!["a.b=1", "a.c.0=2", "a.c.1=3"]);
    }

    #[test]
    fn test_flatten_bare_scalar_uses_prefix_verbatim() {
        assert_eq!(flatten(&json!(5), "x."), vec!["x.=5"]);
    }

    #[test]
    fn test_flatten_scalar_kinds() {
        let lines = flatten(
            &json!({"s": "hello", "n": 1.5, "t": true, "z": null}),
            "",
        );
        assert_eq!(lines, vec!["s=hello", "n=1.5", "t=true", "z=null"]);
    }

    #[test]
    fn test_flatten_object_inside_array() {
        let lines = flatten(&json!({"a": [{"b": 1}, 2]}), "");
        assert_eq!(lines, vec!["a.0.b=1", "a.1=2"]);
    }

    #[test]
    fn test_flatten_empty_composites_emit_nothing() {
        assert!(flatten(&json!({}), "").is_empty());
        assert!(flatten(&json!({"a": {}, "b": []}), "").is_empty());
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let value = json!({"a": {"b": [1, {"c": "x"}]}, "d": false});
        assert_eq!(flatten(&value, ""), flatten(&value, ""));
    }

    #[test]
    fn test_to_properties_terminates_every_line() {
        let text = to_properties(&json!({"greeting": "hi", "count": 2}));
        assert_eq!(text, "greeting=hi\ncount=2\n");
    }

    #[test]
    fn test_client_bundle_wraps_compact_json() {
        let text = client_bundle("jsWebI18n", &json!({"greeting": "hi"}));
        assert_eq!(text, "jsWebI18n = {\"greeting\":\"hi\"};");
    }

    #[test]
    fn test_property_value_finds_first_match() {
        let text = "# build info\nversion=1.0.0\nversion=9.9.9\n";
        assert_eq!(property_value(text, "version"), Some("1.0.0"));
        assert_eq!(property_value(text, "cdn"), None);
    }

    #[test]
    fn test_property_value_allows_empty_value() {
        assert_eq!(property_value("cdn=\n", "cdn"), Some(""));
    }
}
