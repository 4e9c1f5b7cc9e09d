use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Runtime type tag used as a protocol dispatch key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(String);

impl TypeTag {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_owned())
    }
}

impl From<String> for TypeTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// JSON kind of a value: `null`, `boolean`, `number`, `string`, `array` or `object`
#[must_use]
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// How a protocol path derives a value's type tag
#[derive(Clone)]
pub enum TypeTagger {
    /// String value of the named object field, else the JSON kind
    Field(String),
    /// JSON kind only
    Kind,
    /// Caller-supplied function
    Custom(Arc<dyn Fn(&Value) -> TypeTag + Send + Sync>),
}

impl TypeTagger {
    /// A tagger backed by `f`
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Value) -> TypeTag + Send + Sync + 'static,
    {
        TypeTagger::Custom(Arc::new(f))
    }

    /// The type tag of `value`
    #[must_use]
    pub fn tag_of(&self, value: &Value) -> TypeTag {
        match self {
            TypeTagger::Field(field) => value
                .get(field.as_str())
                .and_then(Value::as_str)
                .map_or_else(|| TypeTag::from(kind_of(value)), TypeTag::from),
            TypeTagger::Kind => TypeTag::from(kind_of(value)),
            TypeTagger::Custom(f) => f(value),
        }
    }
}

impl fmt::Debug for TypeTagger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTagger::Field(field) => f.debug_tuple("Field").field(field).finish(),
            TypeTagger::Kind => f.write_str("Kind"),
            TypeTagger::Custom(_) => f.write_str("Custom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_tagger_falls_back_to_kind() {
        let tagger = TypeTagger::Field("@type".into());
        assert_eq!(tagger.tag_of(&json!({"@type": "User"})).as_str(), "User");
        assert_eq!(tagger.tag_of(&json!({"@type": 3})).as_str(), "object");
        assert_eq!(tagger.tag_of(&json!([1])).as_str(), "array");
        assert_eq!(tagger.tag_of(&json!(null)).as_str(), "null");
    }

    #[test]
    fn test_custom_tagger() {
        let tagger = TypeTagger::custom(|v| {
            TypeTag::new(if v.as_i64().is_some_and(|n| n < 0) { "negative" } else { "other" })
        });
        assert_eq!(tagger.tag_of(&json!(-1)).as_str(), "negative");
        assert_eq!(tagger.tag_of(&json!("x")).as_str(), "other");
    }
}
