//! # yamlconv-tree
//!
//! YAML decoding into a generic value tree with source marks.
//!
//! This crate parses YAML text into [`MarkedValue`], a closed tagged union of
//! the value kinds a JSON-compatible document can hold (null, bool, int64,
//! float64, string, sequence, mapping), with every node carrying the source
//! position it was decoded from. Mappings are ordered lists of key/value
//! pairs, so duplicate keys survive decoding and can be reported with the
//! line of their first occurrence instead of being silently overwritten.
//!
//! ## Example
//!
//! ```rust
//! use yamlconv_tree::parse_strict;
//!
//! let doc = parse_strict("title: My Document\ncount: 3").unwrap();
//! assert_eq!(doc.get("count").and_then(|v| v.as_i64()), Some(3));
//!
//! // Two keys at the same mapping level that normalize to the same
//! // object key are rejected.
//! assert!(parse_strict("a: 1\na: 2").is_err());
//! ```

mod error;
mod parser;
mod value;

pub use error::{Error, Result};
pub use parser::{parse, parse_strict};
pub use value::{Mark, MappingEntry, MarkedValue, Value, format_float};
