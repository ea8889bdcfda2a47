//! Generic Document Tree
//!
//! Untyped representation of parsed YAML/JSON fragments. A document is a tagged
//! union of scalar, sequence and string-keyed mapping. Accessors are kind-checked
//! and fail closed: asking a sequence for its mapping yields `None`, never a panic.
//!
//! Mappings keep insertion order so serialized descriptors follow the order in
//! which keys were read or assigned.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// String-keyed mapping with stable insertion order.
pub type Mapping = IndexMap<String, Document>;

/// Leaf values.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    String(String),
}

/// Shape of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Scalar,
    Sequence,
    Mapping,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Scalar => write!(f, "scalar"),
            DocumentKind::Sequence => write!(f, "sequence"),
            DocumentKind::Mapping => write!(f, "mapping"),
        }
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Scalar(Scalar),
    Sequence(Vec<Document>),
    Mapping(Mapping),
}

impl Default for Document {
    fn default() -> Self {
        Document::Scalar(Scalar::Null)
    }
}

impl Document {
    /// Empty mapping node.
    pub fn mapping() -> Self {
        Document::Mapping(Mapping::new())
    }

    /// Empty sequence node.
    pub fn sequence() -> Self {
        Document::Sequence(Vec::new())
    }

    pub fn null() -> Self {
        Document::Scalar(Scalar::Null)
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Scalar(_) => DocumentKind::Scalar,
            Document::Sequence(_) => DocumentKind::Sequence,
            Document::Mapping(_) => DocumentKind::Mapping,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Document::Scalar(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Document::Sequence(_))
    }

    /// Empty container of the same kind as `self`. Scalars yield null.
    pub fn empty_like(&self) -> Document {
        match self {
            Document::Scalar(_) => Document::null(),
            Document::Sequence(_) => Document::sequence(),
            Document::Mapping(_) => Document::mapping(),
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Document::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Document::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Document]> {
        match self {
            Document::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Look up a key when `self` is a mapping.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Set `key` on a mapping. Returns false (and does nothing) when `self` is
    /// not a mapping.
    pub fn insert(&mut self, key: impl Into<String>, value: Document) -> bool {
        match self.as_mapping_mut() {
            Some(map) => {
                map.insert(key.into(), value);
                true
            }
            None => false,
        }
    }

    /// Shallow-copy every top-level key of `source` into `self`.
    ///
    /// Later writes win on key collisions. Nested values are cloned whole, not
    /// merged. Returns false when either side is not a mapping.
    pub fn copy_fields_from(&mut self, source: &Document) -> bool {
        let (Some(target), Some(source)) = (self.as_mapping_mut(), source.as_mapping()) else {
            return false;
        };
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
        true
    }

    /// Parse a YAML string into a document.
    pub fn from_yaml_str(text: &str) -> Result<Document, serde_yaml::Error> {
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        Ok(Document::from(value))
    }

    /// Parse a JSON string into a document.
    pub fn from_json_str(text: &str) -> Result<Document, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(Document::from(value))
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Document::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Document::Scalar(Scalar::String(value))
    }
}

impl From<bool> for Document {
    fn from(value: bool) -> Self {
        Document::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for Document {
    fn from(value: i64) -> Self {
        Document::Scalar(Scalar::Integer(value))
    }
}

impl From<Vec<Document>> for Document {
    fn from(items: Vec<Document>) -> Self {
        Document::Sequence(items)
    }
}

impl From<Mapping> for Document {
    fn from(map: Mapping) -> Self {
        Document::Mapping(map)
    }
}

impl From<serde_yaml::Value> for Document {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;
        match value {
            Value::Null => Document::null(),
            Value::Bool(b) => Document::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Document::Scalar(number(n.as_i64(), n.as_u64(), n.as_f64())),
            Value::String(s) => Document::Scalar(Scalar::String(s)),
            Value::Sequence(items) => {
                Document::Sequence(items.into_iter().map(Document::from).collect())
            }
            Value::Mapping(map) => Document::Mapping(
                map.into_iter()
                    .map(|(k, v)| (yaml_key_to_string(k), Document::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => Document::from(tagged.value),
        }
    }
}

/// Narrowest lossless scalar for a parsed number: signed, then unsigned, then float.
fn number(signed: Option<i64>, unsigned: Option<u64>, float: Option<f64>) -> Scalar {
    match (signed, unsigned) {
        (Some(i), _) => Scalar::Integer(i),
        (None, Some(u)) => Scalar::Unsigned(u),
        (None, None) => Scalar::Float(float.unwrap_or(f64::NAN)),
    }
}

/// YAML allows non-string keys (`8080: open`). They are stored by their
/// textual form.
fn yaml_key_to_string(key: serde_yaml::Value) -> String {
    use serde_yaml::Value;
    match key {
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

impl From<serde_json::Value> for Document {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Document::null(),
            Value::Bool(b) => Document::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Document::Scalar(number(n.as_i64(), n.as_u64(), n.as_f64())),
            Value::String(s) => Document::Scalar(Scalar::String(s)),
            Value::Array(items) => {
                Document::Sequence(items.into_iter().map(Document::from).collect())
            }
            Value::Object(map) => Document::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, Document::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Integer(i) => serializer.serialize_i64(*i),
            Scalar::Unsigned(u) => serializer.serialize_u64(*u),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Document::Scalar(scalar) => scalar.serialize(serializer),
            Document::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Document::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}
