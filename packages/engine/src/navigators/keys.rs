use std::mem;

use serde_json::{Map, Value};

use super::{Key, resolve_index};
use crate::error::{PathResult, navigation};
use crate::navigator::{Context, Navigator, SelectFn, TransformFn};
use crate::path::Path;

/// Navigates to a key of an object or an index of an array
///
/// A missing key, or a `null` focus, navigates to `null`. Writing `null` to a
/// missing key leaves it absent; writing a value to a `null` focus creates a
/// one-key object. Other scalars expose nothing.
#[derive(Debug, Clone)]
pub struct Keypath {
    key: Key,
}

impl Keypath {
    #[must_use]
    pub fn new(key: impl Into<Key>) -> Self {
        Self { key: key.into() }
    }
}

impl Navigator for Keypath {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        match (focus, &self.key) {
            (Value::Object(map), Key::Name(name)) => {
                next(cx, map.get(name).unwrap_or(&Value::Null))
            }
            (Value::Array(items), Key::Index(index)) => {
                let found = resolve_index(*index, items.len()).and_then(|i| items.get(i));
                next(cx, found.unwrap_or(&Value::Null))
            }
            (Value::Null, _) => next(cx, &Value::Null),
            _ => Ok(()),
        }
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        match (focus, &self.key) {
            (Value::Object(mut map), Key::Name(name)) => {
                if let Some(slot) = map.get_mut(name) {
                    let old = mem::take(slot);
                    *slot = next(cx, old)?;
                } else {
                    let created = next(cx, Value::Null)?;
                    if !created.is_null() {
                        map.insert(name.clone(), created);
                    }
                }
                Ok(Value::Object(map))
            }
            (Value::Array(mut items), Key::Index(index)) => {
                match resolve_index(*index, items.len()) {
                    Some(i) => {
                        let old = mem::take(&mut items[i]);
                        items[i] = next(cx, old)?;
                    }
                    None => {
                        let created = next(cx, Value::Null)?;
                        if !created.is_null() {
                            return Err(navigation(
                                "keypath",
                                format!("index {index} is out of bounds for length {}", items.len()),
                            ));
                        }
                    }
                }
                Ok(Value::Array(items))
            }
            (Value::Null, key) => {
                let created = next(cx, Value::Null)?;
                match (created, key) {
                    (Value::Null, _) => Ok(Value::Null),
                    (value, Key::Name(name)) => {
                        let mut map = Map::new();
                        map.insert(name.clone(), value);
                        Ok(Value::Object(map))
                    }
                    (_, Key::Index(index)) => Err(navigation(
                        "keypath",
                        format!("cannot create index {index} on null"),
                    )),
                }
            }
            (other, _) => Ok(other),
        }
    }
}

/// Navigates to a key or index only when it exists
#[derive(Debug, Clone)]
pub struct Must {
    key: Key,
}

impl Must {
    #[must_use]
    pub fn new(key: impl Into<Key>) -> Self {
        Self { key: key.into() }
    }
}

impl Navigator for Must {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        let found = match (focus, &self.key) {
            (Value::Object(map), Key::Name(name)) => map.get(name),
            (Value::Array(items), Key::Index(index)) => {
                resolve_index(*index, items.len()).and_then(|i| items.get(i))
            }
            _ => None,
        };
        match found {
            Some(value) => next(cx, value),
            None => Ok(()),
        }
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        match (focus, &self.key) {
            (Value::Object(mut map), Key::Name(name)) => {
                if let Some(slot) = map.get_mut(name) {
                    let old = mem::take(slot);
                    *slot = next(cx, old)?;
                }
                Ok(Value::Object(map))
            }
            (Value::Array(mut items), Key::Index(index)) => {
                if let Some(i) = resolve_index(*index, items.len()) {
                    let old = mem::take(&mut items[i]);
                    items[i] = next(cx, old)?;
                }
                Ok(Value::Array(items))
            }
            (other, _) => Ok(other),
        }
    }
}

/// Navigate to `key`, or to `null` where it is missing
#[must_use]
pub fn keypath(key: impl Into<Key>) -> Path {
    Path::from_navigator(Keypath::new(key))
}

/// Navigate to `key` only where it exists
#[must_use]
pub fn must(key: impl Into<Key>) -> Path {
    Path::from_navigator(Must::new(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{select, setval, transform};
    use crate::navigator::UpdateFn;
    use serde_json::json;

    #[test]
    fn test_keypath_missing_key_is_null() {
        assert_eq!(
            select(&keypath("b"), &json!({"a": 1})).expect("select"),
            vec![Value::Null]
        );
        assert_eq!(select(&keypath("b"), &Value::Null).expect("select"), vec![Value::Null]);
        assert!(select(&keypath("b"), &json!(5)).expect("select").is_empty());
    }

    #[test]
    fn test_keypath_transform_preserves_absence() {
        let data = json!({"a": 1});
        let unchanged = transform(&keypath("b"), &UpdateFn::identity(), data.clone())
            .expect("transform");
        assert_eq!(unchanged, data);

        let created = setval(&keypath("b"), json!(2), data).expect("setval");
        assert_eq!(created, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_keypath_creates_nested_objects_from_null() {
        let path = keypath("a").then(keypath("b"));
        let updated = setval(&path, json!(1), json!({})).expect("setval");
        assert_eq!(updated, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_keypath_array_index() {
        let data = json!([10, 20, 30]);
        assert_eq!(select(&keypath(-1), &data).expect("select"), vec![json!(30)]);
        assert_eq!(
            setval(&keypath(1), json!(0), data.clone()).expect("setval"),
            json!([10, 0, 30])
        );
        assert!(setval(&keypath(5), json!(0), data).is_err());
    }

    #[test]
    fn test_must_skips_missing() {
        let data = json!({"a": 1});
        assert!(select(&must("b"), &data).expect("select").is_empty());
        assert_eq!(setval(&must("b"), json!(2), data.clone()).expect("setval"), data);
        assert_eq!(
            setval(&must("a"), json!(2), data).expect("setval"),
            json!({"a": 2})
        );
    }
}
