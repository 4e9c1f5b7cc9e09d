use serde_json::Value;

use crate::error::{PathResult, navigation};
use crate::navigator::{
    Context, NavRef, Navigator, SelectFn, TransformFn, UpdateFn, select_values, transform_value,
};
use crate::path::{Path, PathElem};

/// Navigates to the array of every value a sub-path selects
///
/// A transform must return an array of the same length. Its elements are
/// written back to the sub-path's locations in traversal order.
#[derive(Debug)]
pub struct Subselect {
    path: NavRef,
}

impl Subselect {
    #[must_use]
    pub fn new(path: NavRef) -> Self {
        Self { path }
    }
}

impl Navigator for Subselect {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        let values = select_values(self.path.as_ref(), cx, focus)?;
        next(cx, &Value::Array(values))
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        let values = select_values(self.path.as_ref(), cx, &focus)?;
        let expected = values.len();
        let replacement = match next(cx, Value::Array(values))? {
            Value::Array(items) if items.len() == expected => items,
            Value::Array(items) => {
                return Err(navigation(
                    "subselect",
                    format!(
                        "update returned {} values for {expected} locations",
                        items.len()
                    ),
                ));
            }
            other => {
                return Err(navigation(
                    "subselect",
                    format!("update must return an array, got {other}"),
                ));
            }
        };

        let mut items = replacement.into_iter();
        let mut sub = cx.nested();
        self.path
            .transform_step(&mut sub, focus, &mut |_: &mut Context, _: Value| {
                items
                    .next()
                    .ok_or_else(|| navigation("subselect", "sub-path locations changed during write-back"))
            })
    }
}

/// Navigates to the focus as transformed through a sub-path
#[derive(Debug)]
pub struct Transformed {
    path: NavRef,
    update: UpdateFn,
}

impl Transformed {
    #[must_use]
    pub fn new(path: NavRef, update: UpdateFn) -> Self {
        Self { path, update }
    }
}

impl Navigator for Transformed {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        let view = transform_value(self.path.as_ref(), cx, focus.clone(), &self.update)?;
        next(cx, &view)
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        let view = transform_value(self.path.as_ref(), cx, focus, &self.update)?;
        next(cx, view)
    }
}

/// Navigate to the array of everything `path` selects
#[must_use]
pub fn subselect(path: Path) -> Path {
    Path::from_elem(PathElem::Subselect(path))
}

/// Navigate to the focus with `update` applied through `path`
#[must_use]
pub fn transformed(path: Path, update: UpdateFn) -> Path {
    Path::from_elem(PathElem::Transformed { path, update })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigators::{all, keypath, pred};
    use crate::operations::{select, transform};
    use serde_json::json;

    fn even(value: &Value) -> bool {
        value.as_i64().is_some_and(|n| n % 2 == 0)
    }

    fn reversed(value: Value) -> Value {
        match value {
            Value::Array(mut items) => {
                items.reverse();
                Value::Array(items)
            }
            other => other,
        }
    }

    #[test]
    fn test_subselect_reverses_matching_elements_in_place() {
        let path = subselect(all().then(pred(even)));
        let updated = transform(&path, &UpdateFn::unary(reversed), json!([1, 2, 3, 4, 5, 6]))
            .expect("transform");
        assert_eq!(updated, json!([1, 6, 3, 4, 5, 2]));
    }

    #[test]
    fn test_subselect_rejects_length_change() {
        let path = subselect(all());
        let err = transform(&path, &UpdateFn::unary(|_| json!([1])), json!([1, 2]))
            .expect_err("length changed");
        assert!(matches!(err, crate::error::PathError::Navigation { .. }));
    }

    #[test]
    fn test_transformed_is_a_view() {
        let path = transformed(
            all(),
            UpdateFn::unary(|v| json!(v.as_i64().unwrap_or(0) * 10)),
        )
        .then(all());
        let data = json!({"xs": [1, 2]});
        assert_eq!(
            select(&keypath("xs").then(path), &data).expect("select"),
            vec![json!(10), json!(20)]
        );
    }
}
