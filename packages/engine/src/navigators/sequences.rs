use std::mem;

use serde_json::{Map, Value};

use super::resolve_index;
use crate::error::{PathResult, invalid_parameter, navigation};
use crate::navigator::{Context, Navigator, SelectFn, TransformFn};
use crate::path::Path;

/// Navigates to every element of an array, or every entry of an object
///
/// Object entries are exposed as `[key, value]` pairs. A transform over an
/// object must return such a pair for every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct All;

fn entry_pair(key: &str, value: Value) -> Value {
    Value::Array(vec![Value::String(key.to_owned()), value])
}

fn split_pair(pair: Value) -> PathResult<(String, Value)> {
    match pair {
        Value::Array(mut items) if items.len() == 2 => {
            let value = items.pop().unwrap_or(Value::Null);
            match items.pop() {
                Some(Value::String(key)) => Ok((key, value)),
                other => Err(navigation(
                    "all",
                    format!("object entry key must be a string, got {other:?}"),
                )),
            }
        }
        other => Err(navigation(
            "all",
            format!("object entries must be [key, value] pairs, got {other}"),
        )),
    }
}

impl Navigator for All {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        match focus {
            Value::Array(items) => items.iter().try_for_each(|item| next(cx, item)),
            Value::Object(map) => map
                .iter()
                .try_for_each(|(key, value)| next(cx, &entry_pair(key, value.clone()))),
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
            Value::Array(items) => items
                .into_iter()
                .map(|item| next(cx, item))
                .collect::<PathResult<Vec<_>>>()
                .map(Value::Array),
            Value::Object(map) => {
                let mut rebuilt = Map::new();
                for (key, value) in map {
                    let (key, value) = split_pair(next(cx, entry_pair(&key, value))?)?;
                    rebuilt.insert(key, value);
                }
                Ok(Value::Object(rebuilt))
            }
            other => Ok(other),
        }
    }
}

/// Navigates to one array element; negative indices count from the end
#[derive(Debug, Clone, Copy)]
pub struct Nth {
    index: i64,
}

impl Nth {
    #[must_use]
    pub fn new(index: i64) -> Self {
        Self { index }
    }
}

impl Navigator for Nth {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        match focus {
            Value::Array(items) => match resolve_index(self.index, items.len()) {
                Some(i) => next(cx, &items[i]),
                None => Ok(()),
            },
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
            Value::Array(mut items) => {
                if let Some(i) = resolve_index(self.index, items.len()) {
                    let old = mem::take(&mut items[i]);
                    items[i] = next(cx, old)?;
                }
                Ok(Value::Array(items))
            }
            other => Ok(other),
        }
    }
}

/// Navigates to the sub-array `[start, end)` as a single array value
///
/// The end is clamped to the array length. A transform must return an array,
/// which is spliced in place of the range.
#[derive(Debug, Clone, Copy)]
pub struct Srange {
    start: usize,
    end: usize,
}

impl Srange {
    /// # Errors
    ///
    /// Returns `PathError::InvalidParameter` when `start > end`.
    pub fn new(start: usize, end: usize) -> PathResult<Self> {
        if start > end {
            return Err(invalid_parameter(
                "srange",
                format!("start {start} is past end {end}"),
            ));
        }
        Ok(Self { start, end })
    }

    fn bounds(&self, len: usize) -> (usize, usize) {
        let end = self.end.min(len);
        (self.start.min(end), end)
    }
}

impl Navigator for Srange {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        match focus {
            Value::Array(items) => {
                let (start, end) = self.bounds(items.len());
                next(cx, &Value::Array(items[start..end].to_vec()))
            }
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
            Value::Array(mut items) => {
                let (start, end) = self.bounds(items.len());
                let mut tail = items.split_off(start);
                let rest = tail.split_off(end - start);
                match next(cx, Value::Array(tail))? {
                    Value::Array(replacement) => {
                        items.extend(replacement);
                        items.extend(rest);
                        Ok(Value::Array(items))
                    }
                    other => Err(navigation(
                        "srange",
                        format!("update must return an array, got {other}"),
                    )),
                }
            }
            other => Ok(other),
        }
    }
}

/// Navigate to every element or entry
#[must_use]
pub fn all() -> Path {
    Path::from_navigator(All)
}

/// Navigate to the element at `index`
#[must_use]
pub fn nth(index: i64) -> Path {
    Path::from_navigator(Nth::new(index))
}

/// Navigate to the first element
#[must_use]
pub fn first() -> Path {
    nth(0)
}

/// Navigate to the last element
#[must_use]
pub fn last() -> Path {
    nth(-1)
}

/// Navigate to the sub-array `[start, end)`
///
/// # Errors
///
/// Returns `PathError::InvalidParameter` when `start > end`.
pub fn srange(start: usize, end: usize) -> PathResult<Path> {
    Srange::new(start, end).map(Path::from_navigator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::UpdateFn;
    use crate::operations::{select, setval, transform};
    use serde_json::json;

    #[test]
    fn test_all_over_object_entries() {
        let data = json!({"a": 1, "b": 2});
        assert_eq!(
            select(&all(), &data).expect("select"),
            vec![json!(["a", 1]), json!(["b", 2])]
        );
        let renamed = transform(
            &all(),
            &UpdateFn::unary(|pair| match pair {
                Value::Array(kv) => json!([format!("{}!", kv[0].as_str().unwrap_or("")), kv[1].clone()]),
                other => other,
            }),
            data,
        )
        .expect("transform");
        assert_eq!(renamed, json!({"a!": 1, "b!": 2}));
    }

    #[test]
    fn test_all_rejects_malformed_entry() {
        let err = setval(&all(), json!(5), json!({"a": 1})).expect_err("not a pair");
        assert!(matches!(err, crate::error::PathError::Navigation { .. }));
    }

    #[test]
    fn test_first_last_and_out_of_range() {
        let data = json!([1, 2, 3]);
        assert_eq!(select(&first(), &data).expect("first"), vec![json!(1)]);
        assert_eq!(select(&last(), &data).expect("last"), vec![json!(3)]);
        assert!(select(&nth(7), &data).expect("nth").is_empty());
        assert!(select(&first(), &json!([])).expect("empty").is_empty());
    }

    #[test]
    fn test_srange_splices() {
        let path = srange(1, 3).expect("valid range");
        let data = json!([0, 1, 2, 3, 4]);
        assert_eq!(select(&path, &data).expect("select"), vec![json!([1, 2])]);
        let updated = setval(&path, json!(["x"]), data).expect("setval");
        assert_eq!(updated, json!([0, "x", 3, 4]));
    }

    #[test]
    fn test_srange_rejects_inverted_bounds() {
        assert!(srange(3, 1).is_err());
    }
}
