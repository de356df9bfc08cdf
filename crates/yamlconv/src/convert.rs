//! Bidirectional YAML/JSON text conversion.

use tracing::trace;

use crate::normalize::normalize;
use crate::Result;

/// Convert YAML text to compact JSON text.
///
/// Decoding is strict: two keys at the same mapping level that normalize to
/// the same object key abort the conversion with a duplicate-key error that
/// names the key and the line of its first occurrence. Non-string mapping
/// keys (integers, floats, booleans, null) are rendered to their canonical
/// string spellings, so `1e+36: a` and
/// `1000000000000000000000000000000000000: a` both produce the object key
/// `"1e+36"`.
///
/// # Example
///
/// ```rust
/// let json = yamlconv::yaml_to_json("t: a\n").unwrap();
/// assert_eq!(json, r#"{"t":"a"}"#);
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is malformed, contains duplicate keys, or
/// holds a value the JSON model cannot represent. No output is produced on
/// error.
pub fn yaml_to_json(yaml: &str) -> Result<String> {
    trace!(bytes = yaml.len(), "converting YAML to JSON");
    let tree = yamlconv_tree::parse_strict(yaml)?;
    let value = normalize(&tree)?;
    Ok(serde_json::to_string(&value)?)
}

/// Convert JSON text to canonical YAML text.
///
/// The rendering is canonical regardless of how a document was originally
/// spelled: block style for mappings and sequences, insertion-order keys,
/// `null` rendered as the literal `null` token (never blank), and scalars
/// quoted whenever their plain spelling would be read back as another type
/// (a key of `"1"` does not come back as an integer).
///
/// # Example
///
/// ```rust
/// let yaml = yamlconv::json_to_yaml(r#"{"t":null}"#).unwrap();
/// assert_eq!(yaml, "t: null\n");
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid JSON.
pub fn json_to_yaml(json: &str) -> Result<String> {
    trace!(bytes = json.len(), "converting JSON to YAML");
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(serde_yaml::to_string(&value)?)
}
