//! Renders a [`TextValue`] tree back into ISLA text format.

use crate::error::{Error, Result};
use crate::value::TextValue;

/// Encode a tree to the line-oriented text format. Only `List` and `Map`
/// values can be the root of a document; a bare leaf or `none` has no
/// line-grammar representation to anchor the header against.
pub fn encode_text(value: &TextValue) -> Result<String> {
    match value {
        TextValue::Leaf(_) => Err(Error::NotEncodable {
            reason: "a bare leaf cannot be the root of a document",
        }),
        TextValue::None => Err(Error::NotEncodable {
            reason: "none cannot be the root of a document",
        }),
        TextValue::List(_) | TextValue::Map(_) => {
            let mut lines = vec!["ISLA1".to_string()];
            encode_scope(value, 0, &mut lines);
            Ok(lines.join("\n"))
        }
    }
}

fn encode_scope(value: &TextValue, level: usize, lines: &mut Vec<String>) {
    match value {
        TextValue::List(items) => {
            for item in items {
                encode_list_item(item, level, lines);
            }
        }
        TextValue::Map(map) => {
            for (key, item) in map {
                encode_map_entry(key, item, level, lines);
            }
        }
        TextValue::None => {}
        TextValue::Leaf(_) => unreachable!("a leaf cannot be a scope body"),
    }
}

fn encode_list_item(item: &TextValue, level: usize, lines: &mut Vec<String>) {
    let indent = "\t".repeat(level);
    match item {
        TextValue::Leaf(s) => encode_leaf(s, &format!("{}-", indent), lines, true),
        TextValue::List(_) | TextValue::Map(_) => {
            lines.push(format!("{}-:", indent));
            encode_scope(item, level + 1, lines);
        }
        TextValue::None => lines.push(format!("{}-:", indent)),
    }
}

fn encode_map_entry(key: &str, value: &TextValue, level: usize, lines: &mut Vec<String>) {
    let indent = "\t".repeat(level);
    let enc_key = encode_key(key);
    match value {
        TextValue::Leaf(s) => encode_leaf(s, &format!("{}{}=", indent, enc_key), lines, false),
        TextValue::List(_) | TextValue::Map(_) => {
            lines.push(format!("{}{}:", indent, enc_key));
            encode_scope(value, level + 1, lines);
        }
        TextValue::None => lines.push(format!("{}{}:", indent, enc_key)),
    }
}

/// Emit a leaf value after a `prefix` that already contains the `-` or
/// `KEY=` marker: a single-line value is appended directly; a value
/// containing `\n` becomes a multi-line block. The single-character value
/// `"` is always escaped so it isn't mistaken for a multi-line
/// opener/closer. In list context (`in_list`), a value of exactly `:` is
/// also escaped — unescaped, `-:` is the grammar for opening a nested
/// scope, so a literal `:` list item would otherwise be misread as one.
fn encode_leaf(s: &str, prefix: &str, lines: &mut Vec<String>, in_list: bool) {
    if s.contains('\n') {
        lines.push(format!("{}\"", prefix));
        for body_line in s.split('\n') {
            if body_line == "\"" {
                lines.push("\\\"".to_string());
            } else {
                lines.push(body_line.to_string());
            }
        }
        lines.push("\"".to_string());
    } else if s == "\"" {
        lines.push(format!("{}\\\"", prefix));
    } else if in_list && s == ":" {
        lines.push(format!("{}\\:", prefix));
    } else {
        lines.push(format!("{}{}", prefix, s));
    }
}

/// Escape a map key for the line grammar: a leading `-` would otherwise be
/// read as a list item marker, a leading `;` would otherwise be read as a
/// comment marker (hiding the whole line from the map grammar), and any
/// `=`/`:` would be read as the key/value operator.
fn encode_key(key: &str) -> String {
    let mut out = String::new();
    for (i, c) in key.chars().enumerate() {
        match c {
            '-' if i == 0 => out.push_str("\\-"),
            ';' if i == 0 => out.push_str("\\;"),
            '=' => out.push_str("\\="),
            ':' => out.push_str("\\:"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_decode::decode_text_str;

    #[test]
    fn leaf_at_root_is_rejected() {
        let err = encode_text(&TextValue::Leaf("x".into())).unwrap_err();
        assert!(matches!(err, Error::NotEncodable { .. }));
    }

    #[test]
    fn none_at_root_is_rejected() {
        let err = encode_text(&TextValue::None).unwrap_err();
        assert!(matches!(err, Error::NotEncodable { .. }));
    }

    #[test]
    fn round_trips_list_with_escapes() {
        let value = TextValue::leaf_list([";)", ":3", ":"]);
        let text = encode_text(&value).unwrap();
        assert_eq!(decode_text_str(&text).unwrap(), value);
    }

    /// A literal `:` list item must be escaped to `-\:`, not emitted bare as
    /// `-:` — the latter is the grammar for opening a nested scope, so it
    /// would silently decode back to `TextValue::None` instead of `":"`.
    #[test]
    fn literal_colon_list_item_is_escaped_on_encode() {
        let value = TextValue::List(vec![TextValue::Leaf(":".to_string())]);
        let text = encode_text(&value).unwrap();
        assert_eq!(text, "ISLA1\n-\\:");
        assert_eq!(decode_text_str(&text).unwrap(), value);
    }

    /// A map key of exactly `;` must be escaped to `\;`, not emitted bare —
    /// a line starting with `;` is the comment marker, so an unescaped `;`
    /// key would decode the whole entry away instead of back to itself.
    #[test]
    fn leading_semicolon_key_is_escaped_on_encode() {
        let value = TextValue::leaf_map([(";", "value")]);
        let text = encode_text(&value).unwrap();
        assert_eq!(text, "ISLA1\n\\;=value");
        assert_eq!(decode_text_str(&text).unwrap(), value);
    }

    #[test]
    fn leading_semicolon_key_with_trailing_chars_round_trips() {
        let value = TextValue::leaf_map([(";hello", "value")]);
        let text = encode_text(&value).unwrap();
        assert_eq!(decode_text_str(&text).unwrap(), value);
    }

    #[test]
    fn round_trips_map_with_odd_keys() {
        let value = TextValue::leaf_map([
            ("-5 - 3", "negative five minus three"),
            ("=", "equals"),
            (":)", "smiley"),
        ]);
        let text = encode_text(&value).unwrap();
        assert_eq!(decode_text_str(&text).unwrap(), value);
    }

    #[test]
    fn round_trips_multiline_value() {
        let body = "He engraved on it the words:\n\"And this, too, shall pass away.\n\"";
        let value = TextValue::leaf_map([("Quote", body)]);
        let text = encode_text(&value).unwrap();
        assert_eq!(decode_text_str(&text).unwrap(), value);
    }

    #[test]
    fn round_trips_nested_scopes() {
        let mut inner = crate::value::ValueMap::new();
        inner.insert("name".to_string(), TextValue::Leaf("grid".to_string()));
        inner.insert(
            "rows".to_string(),
            TextValue::List(vec![
                TextValue::leaf_list(["1", "2"]),
                TextValue::leaf_list(["3", "4"]),
            ]),
        );
        let value = TextValue::Map(inner);
        let text = encode_text(&value).unwrap();
        assert_eq!(decode_text_str(&text).unwrap(), value);
    }

    #[test]
    fn empty_nested_scope_round_trips_to_none() {
        let value = TextValue::leaf_map([("present", "1")]);
        let mut map = value.as_map().unwrap().clone();
        map.insert("empty".to_string(), TextValue::None);
        let value = TextValue::Map(map);
        let text = encode_text(&value).unwrap();
        let decoded = decode_text_str(&text).unwrap();
        assert_eq!(decoded.index_key("empty").unwrap(), &TextValue::None);
        assert_eq!(decoded.get_leaf_key("present", ""), "1");
    }
}
