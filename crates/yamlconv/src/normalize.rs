//! Depth-first rewrite of a decoded tree into the JSON data model.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use yamlconv_tree::{MarkedValue, Value};

use crate::{Error, Result};

/// Normalize a decoded value tree into a `serde_json::Value`.
///
/// JSON object keys are strings, so every scalar mapping key is rendered to
/// its canonical spelling ([`Value::as_object_key`]); two keys in the same
/// mapping that render identically are a duplicate-key error reporting the
/// first occurrence, never a silent overwrite. Nested sequences and mapping
/// values are normalized depth-first. A bare null root becomes JSON `null`.
pub(crate) fn normalize(node: &MarkedValue) -> Result<serde_json::Value> {
    match &node.value {
        Value::Null => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Int(i) => Ok(serde_json::Value::Number((*i).into())),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or(Error::NonFiniteFloat {
                line: node.mark.line,
            }),
        Value::String(s) => Ok(serde_json::Value::String(s.clone())),
        Value::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(normalize(item)?);
            }
            Ok(serde_json::Value::Array(out))
        }
        Value::Mapping(entries) => {
            let mut out = serde_json::Map::with_capacity(entries.len());
            let mut seen: HashMap<String, usize> = HashMap::new();
            for entry in entries {
                let key = entry.key.value.as_object_key().ok_or(Error::KeyNotScalar {
                    line: entry.key.mark.line,
                })?;
                match seen.entry(key.clone()) {
                    Entry::Occupied(first) => {
                        return Err(yamlconv_tree::Error::DuplicateKey {
                            key,
                            line: *first.get(),
                        }
                        .into());
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(entry.key.mark.line);
                    }
                }
                out.insert(key, normalize(&entry.value)?);
            }
            Ok(serde_json::Value::Object(out))
        }
    }
}
