//! Raw document representation.
//!
//! Documents travel between the core and drivers as ordered JSON objects.

pub use serde_json::Value;

/// A string-keyed attribute map: the body of one stored document.
pub type Attributes = serde_json::Map<String, Value>;

/// Attribute holding the document identifier.
pub const ID: &str = "_id";

/// Attribute holding the document revision.
pub const REV: &str = "_rev";

/// Returns the attribute as a string slice, if it is a string.
pub fn str_attr<'a>(attributes: &'a Attributes, key: &str) -> Option<&'a str> {
    attributes.get(key).and_then(Value::as_str)
}

/// Returns the document identifier, ignoring blank values.
pub fn id(attributes: &Attributes) -> Option<&str> {
    str_attr(attributes, ID).filter(|id| !id.is_empty())
}

/// Returns the document revision, ignoring blank values.
pub fn rev(attributes: &Attributes) -> Option<&str> {
    str_attr(attributes, REV).filter(|rev| !rev.is_empty())
}

/// A value is blank when it is null, a whitespace-only string, or an empty
/// array or object.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Renders a value the way it appears in a view key or an id lookup:
/// strings unquoted, everything else as JSON.
pub fn to_key_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
