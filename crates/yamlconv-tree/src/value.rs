//! Generic value tree with source marks.

use yaml_rust2::scanner::Marker;

/// Source position of a decoded node.
///
/// Built from a `yaml-rust2` scanner marker. Lines are 1-based and columns
/// are 1-based; `index` is the byte offset from the start of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    /// Byte offset from start of source (0-based)
    pub index: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub col: usize,
}

impl Mark {
    /// Create a Mark from a yaml-rust2 scanner marker.
    ///
    /// The scanner's lines are already 1-based; its columns are 0-based.
    pub fn from_marker(marker: &Marker) -> Self {
        Self {
            index: marker.index(),
            line: marker.line(),
            col: marker.col() + 1,
        }
    }
}

impl Default for Mark {
    fn default() -> Self {
        Self {
            index: 0,
            line: 1,
            col: 1,
        }
    }
}

/// A decoded YAML value.
///
/// This is a closed union over the value kinds a JSON-compatible document can
/// hold. Scalar kinds follow YAML's implicit typing: integer literals decode
/// as `Int`, decimal/exponential literals as `Float`, and everything that is
/// neither a number, bool, nor null spelling decodes as `String`.
///
/// Mappings are ordered lists of entries rather than a hash map: rendering
/// must preserve document order, and duplicate keys must stay observable so
/// they can be reported instead of silently merged.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<MarkedValue>),
    Mapping(Vec<MappingEntry>),
}

/// A key-value pair in a mapping, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingEntry {
    pub key: MarkedValue,
    pub value: MarkedValue,
}

/// A [`Value`] together with the source position it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkedValue {
    pub value: Value,
    pub mark: Mark,
}

impl MarkedValue {
    /// Create a marked value.
    pub fn new(value: Value, mark: Mark) -> Self {
        Self { value, mark }
    }

    /// Check if this is a scalar (not a sequence or mapping).
    pub fn is_scalar(&self) -> bool {
        !matches!(self.value, Value::Sequence(_) | Value::Mapping(_))
    }

    /// Check if this is a sequence.
    pub fn is_sequence(&self) -> bool {
        matches!(self.value, Value::Sequence(_))
    }

    /// Check if this is a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self.value, Value::Mapping(_))
    }

    /// Get the string content if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer content if this is an integer scalar.
    pub fn as_i64(&self) -> Option<i64> {
        match self.value {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Get the float content if this is a float scalar.
    pub fn as_f64(&self) -> Option<f64> {
        match self.value {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Get the boolean content if this is a boolean scalar.
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Get sequence elements if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[MarkedValue]> {
        match &self.value {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Get mapping entries if this is a mapping.
    pub fn as_mapping(&self) -> Option<&[MappingEntry]> {
        match &self.value {
            Value::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a mapping value by the normalized form of its key.
    ///
    /// Returns the first entry whose key normalizes to `key`, or None if this
    /// is not a mapping or no key matches.
    pub fn get(&self, key: &str) -> Option<&MarkedValue> {
        match &self.value {
            Value::Mapping(entries) => entries.iter().find_map(|entry| {
                if entry.key.value.as_object_key().as_deref() == Some(key) {
                    Some(&entry.value)
                } else {
                    None
                }
            }),
            _ => None,
        }
    }

    /// Get the number of children (sequence length or mapping entry count).
    pub fn len(&self) -> usize {
        match &self.value {
            Value::Sequence(items) => items.len(),
            Value::Mapping(entries) => entries.len(),
            _ => 0,
        }
    }

    /// Check if this node has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Value {
    /// Render this value as a JSON object key, if it has one.
    ///
    /// JSON object keys are strings, so every scalar mapping key is rendered
    /// to its canonical string spelling: strings verbatim, integers in
    /// decimal, booleans as `true`/`false`, null as `null`, and floats in
    /// their shortest round-trippable form (see [`format_float`]). Sequences
    /// and mappings have no object-key form.
    pub fn as_object_key(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(format_float(*f)),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => Some("null".to_string()),
            Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }
}

/// Format a float in its shortest round-trippable spelling.
///
/// Positional notation is used while the decimal exponent lies in `[-4, 6)`;
/// outside that range the rendering switches to exponential notation with an
/// explicit sign and a two-digit-minimum exponent, so `1e7` renders as
/// `"1e+07"`, `1e36` as `"1e+36"`, and `1.25e-5` as `"1.25e-05"`. This
/// matches how the value would print in the ecosystems this converter
/// exchanges documents with, and it is the canonical spelling used for
/// float-valued mapping keys.
pub fn format_float(f: f64) -> String {
    if !f.is_finite() {
        return f.to_string();
    }
    let sci = format!("{:e}", f);
    let exp = match sci.split_once('e') {
        Some((_, exp)) => exp.parse::<i32>().unwrap_or(0),
        None => 0,
    };
    if (-4..6).contains(&exp) {
        // Display for f64 is positional and shortest-round-trip.
        f.to_string()
    } else {
        let mantissa = sci.split_once('e').map(|(m, _)| m).unwrap_or(&sci);
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_accessors() {
        let node = MarkedValue::new(Value::Int(42), Mark::default());
        assert!(node.is_scalar());
        assert!(!node.is_mapping());
        assert_eq!(node.as_i64(), Some(42));
        assert_eq!(node.as_str(), None);
        assert_eq!(node.len(), 0);
    }

    #[test]
    fn test_mapping_lookup_by_normalized_key() {
        let entry = MappingEntry {
            key: MarkedValue::new(Value::Int(1), Mark::default()),
            value: MarkedValue::new(Value::String("a".into()), Mark::default()),
        };
        let node = MarkedValue::new(Value::Mapping(vec![entry]), Mark::default());
        assert_eq!(node.get("1").and_then(|v| v.as_str()), Some("a"));
        assert!(node.get("2").is_none());
    }

    #[test]
    fn test_object_key_spellings() {
        assert_eq!(Value::String("k".into()).as_object_key().unwrap(), "k");
        assert_eq!(Value::Int(1).as_object_key().unwrap(), "1");
        assert_eq!(Value::Int(-7).as_object_key().unwrap(), "-7");
        assert_eq!(Value::Bool(true).as_object_key().unwrap(), "true");
        assert_eq!(Value::Null.as_object_key().unwrap(), "null");
        assert_eq!(Value::Float(1e36).as_object_key().unwrap(), "1e+36");
        assert!(Value::Sequence(vec![]).as_object_key().is_none());
    }

    #[test]
    fn test_format_float_positional() {
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(1.2), "1.2");
        assert_eq!(format_float(100.0), "100");
        assert_eq!(format_float(-2.5), "-2.5");
        // Just inside the positional range on both ends.
        assert_eq!(format_float(123456.0), "123456");
        assert_eq!(format_float(0.0001), "0.0001");
    }

    #[test]
    fn test_format_float_exponential() {
        assert_eq!(format_float(1e36), "1e+36");
        assert_eq!(format_float(1.25e-5), "1.25e-05");
        assert_eq!(format_float(-3.5e22), "-3.5e+22");
    }

    #[test]
    fn test_format_float_switches_at_exponent_six() {
        assert_eq!(format_float(1e7), "1e+07");
        assert_eq!(format_float(1234567.0), "1.234567e+06");
        assert_eq!(format_float(1e20), "1e+20");
        assert_eq!(format_float(100000.0), "100000");
    }
}
