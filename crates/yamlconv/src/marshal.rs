//! Typed records bridged through the JSON intermediate representation.
//!
//! A record is described once with serde's field attributes (rename et al.)
//! and works for both formats: marshalling encodes the record to JSON and
//! renders that as YAML, unmarshalling converts the YAML document to JSON
//! and decodes the record from it. The conversion step is strict, so a
//! duplicate mapping key anywhere in the document fails the whole call.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::convert::{json_to_yaml, yaml_to_json};
use crate::{Error, Result};

/// Marshal a record to canonical YAML text.
///
/// Mapping keys come out in the record's declared field order, with serde's
/// field attributes applied.
///
/// # Example
///
/// ```rust
/// #[derive(serde::Serialize)]
/// struct Doc {
///     title: String,
///     count: i64,
/// }
///
/// let yaml = yamlconv::to_yaml(&Doc { title: "a".into(), count: 3 }).unwrap();
/// assert_eq!(yaml, "title: a\ncount: 3\n");
/// ```
///
/// # Errors
///
/// Returns an error if the record cannot be represented in the JSON data
/// model (for example a non-finite float or a non-string map key).
pub fn to_yaml<T: Serialize>(record: &T) -> Result<String> {
    let json = serde_json::to_string(record)?;
    json_to_yaml(&json)
}

/// Unmarshal a record from YAML text.
///
/// Fields present in the document but absent from the record are ignored;
/// use [`from_yaml_strict`] to reject them. Decoding is all-or-nothing: on
/// any error no record is produced.
///
/// # Errors
///
/// Fails on malformed YAML, duplicate mapping keys at any level, or values
/// that cannot populate the target field types. Every error is reported
/// under the `yaml: unmarshal errors` category with the underlying detail
/// appended.
pub fn from_yaml<T: DeserializeOwned>(yaml: &str) -> Result<T> {
    let json = yaml_to_json(yaml).map_err(Error::unmarshal)?;
    serde_json::from_str(&json).map_err(|e| Error::unmarshal(e.into()))
}

/// Unmarshal a record from YAML text, rejecting unknown fields.
///
/// Behaves like [`from_yaml`], except that a document field the record does
/// not declare fails the call with an error naming the field's path.
///
/// # Errors
///
/// Everything [`from_yaml`] reports, plus unknown document fields.
pub fn from_yaml_strict<T: DeserializeOwned>(yaml: &str) -> Result<T> {
    let json = yaml_to_json(yaml).map_err(Error::unmarshal)?;

    let mut unknown: Option<String> = None;
    let mut deserializer = serde_json::Deserializer::from_str(&json);
    let record = serde_ignored::deserialize(&mut deserializer, |path| {
        if unknown.is_none() {
            unknown = Some(path.to_string());
        }
    })
    .map_err(|e: serde_json::Error| Error::unmarshal(e.into()))?;

    match unknown {
        Some(path) => Err(Error::unmarshal(Error::UnknownField { path })),
        None => Ok(record),
    }
}
