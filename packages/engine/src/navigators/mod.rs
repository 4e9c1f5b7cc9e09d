//! Built-in navigators over `serde_json::Value`
//!
//! Each navigator is exposed two ways: as a concrete type implementing
//! [`Navigator`](crate::navigator::Navigator), and as a function returning a
//! one-step [`Path`](crate::path::Path). The [`late`] module holds the
//! late-bound forms of the parameterized navigators.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{PathResult, invalid_parameter};
use crate::navigator::NavRef;

mod keys;
pub mod late;
mod maps;
mod sequences;
mod values;

pub use keys::{Keypath, Must, keypath, must};
pub use maps::{MapKeys, MapVals, map_keys, map_vals};
pub use sequences::{All, Nth, Srange, all, first, last, nth, srange};
pub use values::{Pred, Stay, Stop, View, Walker, pred, stay, stop, view, walker};

/// Object key or array index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Name(String),
    /// Negative indices count from the end
    Index(i64),
}

impl Key {
    /// Interpret a runtime argument as a key
    ///
    /// # Errors
    ///
    /// Returns `PathError::InvalidParameter` unless `value` is a string or an
    /// integer.
    pub fn from_value(navigator: &str, value: &Value) -> PathResult<Self> {
        match value {
            Value::String(name) => Ok(Key::Name(name.clone())),
            Value::Number(n) => n.as_i64().map(Key::Index).ok_or_else(|| {
                invalid_parameter(navigator, format!("index must be an integer, got {n}"))
            }),
            other => Err(invalid_parameter(
                navigator,
                format!("expected a string key or integer index, got {other}"),
            )),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{name:?}"),
            Key::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Key::Index(i64::from(index))
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

/// Resolve a possibly negative index against a length
pub(crate) fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let resolved = if index < 0 {
        i64::try_from(len).ok()? + index
    } else {
        index
    };
    usize::try_from(resolved).ok().filter(|&i| i < len)
}

/// The shared identity navigator
#[must_use]
pub fn stay_navigator() -> NavRef {
    Arc::new(Stay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index(0, 3), Some(0));
        assert_eq!(resolve_index(-1, 3), Some(2));
        assert_eq!(resolve_index(-3, 3), Some(0));
        assert_eq!(resolve_index(-4, 3), None);
        assert_eq!(resolve_index(3, 3), None);
        assert_eq!(resolve_index(0, 0), None);
    }

    #[test]
    fn test_key_from_value() {
        assert_eq!(Key::from_value("k", &json!("a")).expect("name"), Key::from("a"));
        assert_eq!(Key::from_value("k", &json!(-2)).expect("index"), Key::Index(-2));
        assert!(Key::from_value("k", &json!(1.5)).is_err());
        assert!(Key::from_value("k", &json!([1])).is_err());
    }
}
