//! # yamlconv
//!
//! Bidirectional YAML↔JSON conversion with a typed marshalling bridge.
//!
//! YAML's data model is richer than JSON's: scalars are untyped text until
//! resolved, mapping keys need not be strings, and a missing value is
//! distinct from an explicit null. This crate resolves that mismatch with a
//! value-preserving tree walk: documents decode through
//! [`yamlconv_tree`] into a generic value tree, non-string mapping keys are
//! normalized to their canonical string spellings, and ambiguous documents —
//! two keys at one mapping level that normalize identically — are rejected
//! with the offending key and its first-occurrence line instead of silently
//! keeping the last write.
//!
//! Typed records ride on the same conversion. Describe a record once with
//! serde's field attributes and it works for both formats, with JSON as the
//! intermediate representation:
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, PartialEq, Deserialize)]
//! #[serde(default)]
//! struct Config {
//!     number: i64,
//!     bool: bool,
//! }
//!
//! let config: Config = yamlconv::from_yaml("bool: true\nnumber: 2").unwrap();
//! assert_eq!(config, Config { number: 2, bool: true });
//!
//! // Ambiguous documents fail instead of taking "last write wins".
//! assert!(yamlconv::from_yaml::<Config>("number: 1\nnumber: 2").is_err());
//! ```
//!
//! Conversions are pure synchronous functions from input text to output
//! text; independent calls share no state. Output is canonical regardless of
//! input style: compact JSON one way, block-style YAML with explicit `null`
//! tokens the other, so converting YAML→JSON→YAML re-converts to the same
//! JSON from then on even when the first YAML rendering differs textually
//! from the input.

mod convert;
mod error;
mod marshal;
mod normalize;

pub use convert::{json_to_yaml, yaml_to_json};
pub use error::{Error, Result};
pub use marshal::{from_yaml, from_yaml_strict, to_yaml};
