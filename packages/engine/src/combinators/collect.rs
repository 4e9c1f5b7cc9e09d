use serde_json::Value;

use crate::error::{PathResult, navigation};
use crate::navigator::{Context, NavRef, Navigator, SelectFn, TransformFn, select_values};
use crate::path::{Path, PathElem};

/// Collects the focused value itself
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureCurrent;

impl Navigator for CaptureCurrent {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        cx.with_collected(focus.clone(), |cx| next(cx, focus))
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        cx.with_collected(focus.clone(), |cx| next(cx, focus))
    }
}

/// Collects the single value a sub-path selects from the focus
///
/// Zero results collect `null`; more than one is a navigation error.
#[derive(Debug)]
pub struct CollectOne {
    path: NavRef,
}

impl CollectOne {
    #[must_use]
    pub fn new(path: NavRef) -> Self {
        Self { path }
    }

    fn collect(&self, cx: &Context, focus: &Value) -> PathResult<Value> {
        let mut values = select_values(self.path.as_ref(), cx, focus)?;
        match values.len() {
            0 => Ok(Value::Null),
            1 => Ok(values.swap_remove(0)),
            n => Err(navigation(
                "collect_one",
                format!("sub-path selected {n} values, expected at most one"),
            )),
        }
    }
}

impl Navigator for CollectOne {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        let value = self.collect(cx, focus)?;
        cx.with_collected(value, |cx| next(cx, focus))
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        let value = self.collect(cx, &focus)?;
        cx.with_collected(value, |cx| next(cx, focus))
    }
}

/// Collects everything a sub-path selects from the focus, as one array
#[derive(Debug)]
pub struct CollectMany {
    path: NavRef,
}

impl CollectMany {
    #[must_use]
    pub fn new(path: NavRef) -> Self {
        Self { path }
    }
}

impl Navigator for CollectMany {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        let values = select_values(self.path.as_ref(), cx, focus)?;
        cx.with_collected(Value::Array(values), |cx| next(cx, focus))
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        let values = select_values(self.path.as_ref(), cx, &focus)?;
        cx.with_collected(Value::Array(values), |cx| next(cx, focus))
    }
}

/// Collects a constant fixed when the path was built
#[derive(Debug, Clone)]
pub struct InjectConstant {
    value: Value,
}

impl InjectConstant {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl Navigator for InjectConstant {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        cx.with_collected(self.value.clone(), |cx| next(cx, focus))
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        cx.with_collected(self.value.clone(), |cx| next(cx, focus))
    }
}

/// Collect the focused value
#[must_use]
pub fn capture_current() -> Path {
    Path::from_elem(PathElem::CaptureCurrent)
}

/// Collect the single value `path` selects from the focus
#[must_use]
pub fn collect_one(path: Path) -> Path {
    Path::from_elem(PathElem::CollectOne(path))
}

/// Collect every value `path` selects from the focus, as an array
#[must_use]
pub fn collect_many(path: Path) -> Path {
    Path::from_elem(PathElem::CollectMany(path))
}

/// Collect `value`
#[must_use]
pub fn inject_constant(value: Value) -> Path {
    Path::from_elem(PathElem::Inject(value))
}
