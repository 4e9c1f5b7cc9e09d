use serde_json::Value;

use crate::error::PathResult;
use crate::navigator::{Context, NavRef, Navigator, SelectFn, TransformFn, selects_any};
use crate::path::{Path, PathElem};

/// Stays at the focus if a sub-path selects anything from it
///
/// With `negate` set, stays only if the sub-path selects nothing.
#[derive(Debug)]
pub struct Selected {
    path: NavRef,
    negate: bool,
}

impl Selected {
    #[must_use]
    pub fn new(path: NavRef, negate: bool) -> Self {
        Self { path, negate }
    }

    fn passes(&self, cx: &Context, focus: &Value) -> PathResult<bool> {
        Ok(selects_any(self.path.as_ref(), cx, focus)? != self.negate)
    }
}

impl Navigator for Selected {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        if self.passes(cx, focus)? {
            next(cx, focus)
        } else {
            Ok(())
        }
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        if self.passes(cx, &focus)? {
            next(cx, focus)
        } else {
            Ok(focus)
        }
    }
}

/// Stay at the focus only where `path` selects something
#[must_use]
pub fn selected(path: Path) -> Path {
    Path::from_elem(PathElem::Selected {
        path,
        negate: false,
    })
}

/// Stay at the focus only where `path` selects nothing
#[must_use]
pub fn not_selected(path: Path) -> Path {
    Path::from_elem(PathElem::Selected { path, negate: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigators::{all, keypath, must, pred};
    use crate::operations::{select, setval};
    use serde_json::json;

    #[test]
    fn test_selected_filters_by_sub_path() {
        let data = json!([{"a": 1}, {"b": 2}, {"a": 3}]);
        let with_a = all().then(selected(must("a")));
        let without_a = all().then(not_selected(must("a")));
        assert_eq!(
            select(&with_a, &data).expect("select"),
            vec![json!({"a": 1}), json!({"a": 3})]
        );
        assert_eq!(select(&without_a, &data).expect("select"), vec![json!({"b": 2})]);
    }

    #[test]
    fn test_selected_transform_leaves_rejected_values() {
        let path = all().then(selected(keypath("a").then(pred(|v| v == &json!(1)))));
        let updated = setval(&path, json!(null), json!([{"a": 1}, {"a": 2}])).expect("setval");
        assert_eq!(updated, json!([null, {"a": 2}]));
    }
}
