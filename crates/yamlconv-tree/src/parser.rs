//! YAML parser that builds marked value trees.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use crate::{Error, Mark, MappingEntry, MarkedValue, Result, Value};

/// Parse YAML from a string, producing a marked value tree.
///
/// This parses a single YAML document. An empty document (or a document whose
/// root is a bare null) decodes as [`Value::Null`]. Duplicate mapping keys
/// are kept in document order; use [`parse_strict`] to reject them.
///
/// # Example
///
/// ```rust
/// use yamlconv_tree::parse;
///
/// let doc = parse("title: My Document").unwrap();
/// assert!(doc.is_mapping());
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is invalid.
pub fn parse(content: &str) -> Result<MarkedValue> {
    parse_impl(content, false)
}

/// Parse YAML from a string, rejecting duplicate mapping keys.
///
/// Duplicate detection is per mapping level: two keys in the *same* mapping
/// whose canonical object-key spellings collide abort the parse with
/// [`Error::DuplicateKey`], reporting the line of the key's first occurrence.
/// The same key in two different nested mappings is fine.
///
/// # Example
///
/// ```rust
/// use yamlconv_tree::{parse_strict, Error};
///
/// let err = parse_strict("a: 1\na: 2").unwrap_err();
/// assert_eq!(err, Error::DuplicateKey { key: "a".into(), line: 1 });
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is invalid or contains duplicate keys.
pub fn parse_strict(content: &str) -> Result<MarkedValue> {
    parse_impl(content, true)
}

fn parse_impl(content: &str, strict: bool) -> Result<MarkedValue> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = TreeBuilder::new();

    parser
        .load(&mut builder, false) // false = single document only
        .map_err(Error::from)?;

    let root = builder.result()?;
    if strict {
        check_duplicate_keys(&root)?;
    }
    Ok(root)
}

/// Reject mappings that contain two keys with the same canonical spelling.
///
/// The seen-key set is scoped to one mapping level; it is rebuilt for every
/// nested mapping. The reported line is always the first occurrence in
/// document order.
fn check_duplicate_keys(node: &MarkedValue) -> Result<()> {
    match &node.value {
        Value::Sequence(items) => {
            for item in items {
                check_duplicate_keys(item)?;
            }
        }
        Value::Mapping(entries) => {
            let mut seen: HashMap<String, usize> = HashMap::new();
            for entry in entries {
                if let Some(key) = entry.key.value.as_object_key() {
                    match seen.entry(key) {
                        Entry::Occupied(first) => {
                            return Err(Error::DuplicateKey {
                                key: first.key().clone(),
                                line: *first.get(),
                            });
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(entry.key.mark.line);
                        }
                    }
                }
                check_duplicate_keys(&entry.key)?;
                check_duplicate_keys(&entry.value)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Builder that implements MarkedEventReceiver to construct the value tree.
struct TreeBuilder {
    /// Stack of container nodes being constructed
    stack: Vec<BuildNode>,

    /// Anchored nodes, by anchor id, for alias resolution
    anchors: HashMap<usize, MarkedValue>,

    /// First error encountered; once set, later events are ignored
    error: Option<Error>,

    /// The completed root node
    root: Option<MarkedValue>,
}

/// A container node being constructed during parsing.
enum BuildNode {
    Sequence {
        start: Mark,
        anchor_id: usize,
        items: Vec<MarkedValue>,
    },
    Mapping {
        start: Mark,
        anchor_id: usize,
        entries: Vec<(MarkedValue, Option<MarkedValue>)>,
    },
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            anchors: HashMap::new(),
            error: None,
            root: None,
        }
    }

    fn result(self) -> Result<MarkedValue> {
        if let Some(error) = self.error {
            return Err(error);
        }
        // An empty stream is a null document.
        Ok(self
            .root
            .unwrap_or_else(|| MarkedValue::new(Value::Null, Mark::default())))
    }

    fn push_complete(&mut self, node: MarkedValue, anchor_id: usize) {
        if anchor_id > 0 {
            self.anchors.insert(anchor_id, node.clone());
        }

        let Some(parent) = self.stack.last_mut() else {
            self.root = Some(node);
            return;
        };

        match parent {
            BuildNode::Sequence { items, .. } => {
                items.push(node);
            }
            BuildNode::Mapping { entries, .. } => {
                if let Some((_, value)) = entries.last_mut() {
                    if value.is_none() {
                        *value = Some(node);
                    } else {
                        // This is a new key
                        entries.push((node, None));
                    }
                } else {
                    // First key
                    entries.push((node, None));
                }
            }
        }
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        if self.error.is_some() {
            return;
        }
        let mark = Mark::from_marker(&marker);

        match ev {
            Event::Nothing
            | Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart
            | Event::DocumentEnd => {}

            Event::Scalar(text, style, anchor_id, tag) => {
                match decode_scalar(&text, style, tag.as_ref(), mark) {
                    Ok(value) => self.push_complete(MarkedValue::new(value, mark), anchor_id),
                    Err(err) => self.error = Some(err),
                }
            }

            Event::SequenceStart(anchor_id, _tag) => {
                self.stack.push(BuildNode::Sequence {
                    start: mark,
                    anchor_id,
                    items: Vec::new(),
                });
            }

            Event::SequenceEnd => {
                let build_node = self.stack.pop().expect("SequenceEnd without SequenceStart");
                let BuildNode::Sequence {
                    start,
                    anchor_id,
                    items,
                } = build_node
                else {
                    panic!("Expected Sequence build node");
                };
                self.push_complete(MarkedValue::new(Value::Sequence(items), start), anchor_id);
            }

            Event::MappingStart(anchor_id, _tag) => {
                self.stack.push(BuildNode::Mapping {
                    start: mark,
                    anchor_id,
                    entries: Vec::new(),
                });
            }

            Event::MappingEnd => {
                let build_node = self.stack.pop().expect("MappingEnd without MappingStart");
                let BuildNode::Mapping {
                    start,
                    anchor_id,
                    entries,
                } = build_node
                else {
                    panic!("Expected Mapping build node");
                };

                let entries = entries
                    .into_iter()
                    .map(|(key, value)| MappingEntry {
                        key,
                        value: value.expect("Mapping entry without value"),
                    })
                    .collect();

                self.push_complete(MarkedValue::new(Value::Mapping(entries), start), anchor_id);
            }

            Event::Alias(anchor_id) => {
                // An alias is a clone of the anchored node. Unknown anchor
                // ids decode as null, matching the loader's fallback.
                let node = match self.anchors.get(&anchor_id) {
                    Some(anchored) => MarkedValue::new(anchored.value.clone(), mark),
                    None => MarkedValue::new(Value::Null, mark),
                };
                self.push_complete(node, 0);
            }
        }
    }
}

const CORE_SCHEMA: &str = "tag:yaml.org,2002:";

/// Decode one scalar event into a typed value.
///
/// Non-plain styles (quoted, literal, folded) are always strings. Explicit
/// core-schema tags force their kind or fail. Plain scalars follow implicit
/// typing: null and bool spellings, then integer literals, then finite
/// decimal/exponential float literals, then strings.
fn decode_scalar(
    text: &str,
    style: TScalarStyle,
    tag: Option<&Tag>,
    mark: Mark,
) -> Result<Value> {
    if let Some(tag) = tag {
        if tag.handle != CORE_SCHEMA {
            return Err(Error::BadTag {
                tag: format!("{}{}", tag.handle, tag.suffix),
                text: text.to_string(),
                line: mark.line,
            });
        }
        let bad_tag = || Error::BadTag {
            tag: tag.suffix.clone(),
            text: text.to_string(),
            line: mark.line,
        };
        return match tag.suffix.as_str() {
            "str" => Ok(Value::String(text.to_string())),
            "null" => match text {
                "~" | "null" | "Null" | "NULL" | "" => Ok(Value::Null),
                _ => Err(bad_tag()),
            },
            "bool" => parse_bool(text).map(Value::Bool).ok_or_else(bad_tag),
            "int" => parse_int(text).map(Value::Int).ok_or_else(bad_tag),
            "float" => parse_float(text).map(Value::Float).ok_or_else(bad_tag),
            _ => Err(bad_tag()),
        };
    }

    if style != TScalarStyle::Plain {
        return Ok(Value::String(text.to_string()));
    }

    match text {
        "~" | "null" | "Null" | "NULL" | "" => return Ok(Value::Null),
        _ => {}
    }
    if let Some(b) = parse_bool(text) {
        return Ok(Value::Bool(b));
    }
    if let Some(i) = parse_int(text) {
        return Ok(Value::Int(i));
    }
    if let Some(f) = parse_float(text) {
        return Ok(Value::Float(f));
    }
    Ok(Value::String(text.to_string()))
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "true" | "True" | "TRUE" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" => Some(true),
        "false" | "False" | "FALSE" | "no" | "No" | "NO" | "off" | "Off" | "OFF" => Some(false),
        _ => None,
    }
}

fn parse_int(text: &str) -> Option<i64> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (radix, digits) = if let Some(hex) = body.strip_prefix("0x") {
        (16, hex)
    } else if let Some(oct) = body.strip_prefix("0o") {
        (8, oct)
    } else if body.len() > 1 && body.starts_with('0') {
        // YAML 1.1 spells octal with a bare leading zero
        (8, &body[1..])
    } else {
        (10, body)
    };
    if digits.is_empty() {
        return None;
    }
    let magnitude = u64::from_str_radix(digits, radix).ok()?;
    if negative {
        // i64::MIN's magnitude is one past i64::MAX
        if magnitude > (i64::MAX as u64) + 1 {
            None
        } else {
            Some((magnitude as i64).wrapping_neg())
        }
    } else {
        i64::try_from(magnitude).ok()
    }
}

fn parse_float(text: &str) -> Option<f64> {
    // Rust's float parser accepts "nan"/"inf" spellings; those are not
    // numeric literals in a document, and non-finite values have no JSON
    // representation anyway.
    if !text.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+' || c == '.') {
        return None;
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(f),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_scalar() {
        let doc = parse("hello").unwrap();
        assert!(doc.is_scalar());
        assert_eq!(doc.as_str(), Some("hello"));
    }

    #[test]
    fn test_parse_integer() {
        let doc = parse("42").unwrap();
        assert_eq!(doc.as_i64(), Some(42));

        assert_eq!(parse("0x2A").unwrap().as_i64(), Some(42));
        assert_eq!(parse("0o52").unwrap().as_i64(), Some(42));
        assert_eq!(parse("-3").unwrap().as_i64(), Some(-3));
        assert_eq!(
            parse("-9223372036854775808").unwrap().as_i64(),
            Some(i64::MIN)
        );
    }

    #[test]
    fn test_parse_leading_zero_octal() {
        assert_eq!(parse("0755").unwrap().as_i64(), Some(493));
        assert_eq!(parse("-0755").unwrap().as_i64(), Some(-493));
        assert_eq!(parse("00").unwrap().as_i64(), Some(0));
        // Not a valid octal literal, so it resolves as a float.
        assert_eq!(parse("09").unwrap().as_f64(), Some(9.0));
    }

    #[test]
    fn test_parse_float() {
        let doc = parse("1.5").unwrap();
        assert_eq!(doc.as_f64(), Some(1.5));

        // Integer literals too large for i64 fall through to float.
        let doc = parse("1000000000000000000000000000000000000").unwrap();
        assert_eq!(doc.as_f64(), Some(1e36));

        let doc = parse("1e+36").unwrap();
        assert_eq!(doc.as_f64(), Some(1e36));
    }

    #[test]
    fn test_parse_bool_spellings() {
        for text in ["true", "True", "yes", "on"] {
            assert_eq!(parse(text).unwrap().as_bool(), Some(true), "{text}");
        }
        for text in ["false", "False", "no", "off"] {
            assert_eq!(parse(text).unwrap().as_bool(), Some(false), "{text}");
        }
    }

    #[test]
    fn test_parse_null_spellings() {
        for text in ["null", "Null", "NULL", "~", ""] {
            assert_eq!(parse(text).unwrap().value, Value::Null, "{text:?}");
        }
    }

    #[test]
    fn test_quoted_scalars_stay_strings() {
        assert_eq!(parse("\"1.2\"").unwrap().as_str(), Some("1.2"));
        assert_eq!(parse("'true'").unwrap().as_str(), Some("true"));
        assert_eq!(parse("\"\"").unwrap().as_str(), Some(""));
    }

    #[test]
    fn test_non_numeric_float_spellings_stay_strings() {
        assert_eq!(parse("nan").unwrap().as_str(), Some("nan"));
        assert_eq!(parse("-infinity").unwrap().as_str(), Some("-infinity"));
    }

    #[test]
    fn test_explicit_tags() {
        assert_eq!(parse("!!str 1").unwrap().as_str(), Some("1"));
        assert_eq!(parse("!!int 1").unwrap().as_i64(), Some(1));
        assert!(matches!(
            parse("!!int foo").unwrap_err(),
            Error::BadTag { .. }
        ));
    }

    #[test]
    fn test_parse_sequence() {
        let doc = parse("[1, 2, 3]").unwrap();
        assert!(doc.is_sequence());
        let items = doc.as_sequence().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_i64(), Some(1));
        assert_eq!(items[2].as_i64(), Some(3));
    }

    #[test]
    fn test_parse_mapping() {
        let doc = parse("title: My Document\nauthor: John Doe").unwrap();
        assert!(doc.is_mapping());
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("title").and_then(|v| v.as_str()), Some("My Document"));
        assert_eq!(doc.get("author").and_then(|v| v.as_str()), Some("John Doe"));
    }

    #[test]
    fn test_nested_structure() {
        let doc = parse(
            r#"
project:
  title: My Project
  authors:
    - Alice
    - Bob
"#,
        )
        .unwrap();

        let project = doc.get("project").unwrap();
        assert!(project.is_mapping());
        let authors = project.get("authors").unwrap();
        assert!(authors.is_sequence());
        assert_eq!(authors.len(), 2);
    }

    #[test]
    fn test_empty_document_is_null() {
        assert_eq!(parse("").unwrap().value, Value::Null);
        assert_eq!(parse_strict("").unwrap().value, Value::Null);
    }

    #[test]
    fn test_blank_mapping_value_is_null() {
        let doc = parse("t: \n").unwrap();
        assert_eq!(doc.get("t").unwrap().value, Value::Null);
    }

    #[test]
    fn test_mark_lines() {
        let doc = parse("a: 1\nb: 2").unwrap();
        let entries = doc.as_mapping().unwrap();
        assert_eq!(entries[0].key.mark.line, 1);
        assert_eq!(entries[1].key.mark.line, 2);
    }

    #[test]
    fn test_alias_resolution() {
        let doc = parse("a: &x 1\nb: *x").unwrap();
        assert_eq!(doc.get("b").and_then(|v| v.as_i64()), Some(1));

        let doc = parse("base: &b\n  k: v\ncopy: *b").unwrap();
        let copy = doc.get("copy").unwrap();
        assert_eq!(copy.get("k").and_then(|v| v.as_str()), Some("v"));
    }

    #[test]
    fn test_lenient_parse_keeps_duplicates() {
        let doc = parse("a: 1\na: 2").unwrap();
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_strict_rejects_duplicates() {
        let err = parse_strict("number: 1\nnumber: 2").unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateKey {
                key: "number".into(),
                line: 1
            }
        );
        assert_eq!(
            err.to_string(),
            "mapping key \"number\" already defined at line 1"
        );
    }

    #[test]
    fn test_strict_rejects_normalized_collisions() {
        // 1 (int) and "1" (string) both spell the object key "1".
        let err = parse_strict("1: a\n\"1\": b").unwrap_err();
        assert_eq!(err, Error::DuplicateKey { key: "1".into(), line: 1 });

        // A huge integer literal and an exponential literal both spell
        // "1e+36".
        let err =
            parse_strict("1000000000000000000000000000000000000: a\n1e+36: b").unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateKey {
                key: "1e+36".into(),
                line: 1
            }
        );
    }

    #[test]
    fn test_strict_scopes_detection_per_level() {
        let doc = parse_strict("outer:\n  k: 1\nother:\n  k: 2").unwrap();
        assert_eq!(doc.len(), 2);

        let err = parse_strict("outer:\n  k: 1\n  k: 2").unwrap_err();
        assert_eq!(err, Error::DuplicateKey { key: "k".into(), line: 2 });
    }

    #[test]
    fn test_strict_reports_first_occurrence_of_mixed_types() {
        let err = parse_strict("a: [1,2,3]\na: value-of-a").unwrap_err();
        assert_eq!(err, Error::DuplicateKey { key: "a".into(), line: 1 });
    }

    #[test]
    fn test_scan_error_carries_position() {
        let err = parse("a: [1, 2").unwrap_err();
        match err {
            Error::Scan { line, .. } => assert!(line >= 1),
            other => panic!("expected scan error, got {other:?}"),
        }
    }
}
