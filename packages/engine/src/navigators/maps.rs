use serde_json::{Map, Value};

use crate::error::{PathResult, navigation};
use crate::navigator::{Context, Navigator, SelectFn, TransformFn};
use crate::path::Path;

/// Navigates to every value of an object
#[derive(Debug, Clone, Copy, Default)]
pub struct MapVals;

impl Navigator for MapVals {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        match focus {
            Value::Object(map) => map.values().try_for_each(|value| next(cx, value)),
            _ => Ok(()),
        }
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        match focus {
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| Ok((key, next(cx, value)?)))
                .collect::<PathResult<Map<_, _>>>()
                .map(Value::Object),
            other => Ok(other),
        }
    }
}

/// Navigates to every key of an object, as a string
#[derive(Debug, Clone, Copy, Default)]
pub struct MapKeys;

impl Navigator for MapKeys {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        match focus {
            Value::Object(map) => map
                .keys()
                .try_for_each(|key| next(cx, &Value::String(key.clone()))),
            _ => Ok(()),
        }
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        match focus {
            Value::Object(map) => {
                let mut rebuilt = Map::new();
                for (key, value) in map {
                    match next(cx, Value::String(key))? {
                        Value::String(key) => {
                            rebuilt.insert(key, value);
                        }
                        other => {
                            return Err(navigation(
                                "map_keys",
                                format!("keys must remain strings, got {other}"),
                            ));
                        }
                    }
                }
                Ok(Value::Object(rebuilt))
            }
            other => Ok(other),
        }
    }
}

/// Navigate to every object value
#[must_use]
pub fn map_vals() -> Path {
    Path::from_navigator(MapVals)
}

/// Navigate to every object key
#[must_use]
pub fn map_keys() -> Path {
    Path::from_navigator(MapKeys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::UpdateFn;
    use crate::operations::{select, transform};
    use serde_json::json;

    #[test]
    fn test_map_vals_increments() {
        let updated = transform(
            &map_vals(),
            &UpdateFn::unary(|v| json!(v.as_i64().unwrap_or(0) + 1)),
            json!({"a": 1, "b": 2}),
        )
        .expect("transform");
        assert_eq!(updated, json!({"a": 2, "b": 3}));
        assert!(select(&map_vals(), &json!([1])).expect("select").is_empty());
    }

    #[test]
    fn test_map_keys_renames() {
        let updated = transform(
            &map_keys(),
            &UpdateFn::unary(|k| json!(k.as_str().unwrap_or("").to_uppercase())),
            json!({"a": 1}),
        )
        .expect("transform");
        assert_eq!(updated, json!({"A": 1}));
        assert!(transform(&map_keys(), &UpdateFn::constant(json!(1)), json!({"a": 1})).is_err());
    }
}
