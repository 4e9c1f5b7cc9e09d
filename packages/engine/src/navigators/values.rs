use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::PathResult;
use crate::navigator::{Context, Navigator, SelectFn, TransformFn};
use crate::path::Path;

type Predicate = dyn Fn(&Value) -> bool + Send + Sync;
type Projection = dyn Fn(&Value) -> Value + Send + Sync;

/// Navigates to the focus itself
#[derive(Debug, Clone, Copy, Default)]
pub struct Stay;

impl Navigator for Stay {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        next(cx, focus)
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        next(cx, focus)
    }

    fn is_identity(&self) -> bool {
        true
    }
}

/// Navigates nowhere
#[derive(Debug, Clone, Copy, Default)]
pub struct Stop;

impl Navigator for Stop {
    fn select_step(&self, _: &mut Context, _: &Value, _: &mut SelectFn<'_>) -> PathResult<()> {
        Ok(())
    }

    fn transform_step(
        &self,
        _: &mut Context,
        focus: Value,
        _: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        Ok(focus)
    }
}

/// Stays at the focus when the predicate holds
#[derive(Clone)]
pub struct Pred {
    test: Arc<Predicate>,
}

impl Pred {
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            test: Arc::new(test),
        }
    }
}

impl fmt::Debug for Pred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pred")
    }
}

impl Navigator for Pred {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        if (self.test)(focus) {
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
        if (self.test)(&focus) {
            next(cx, focus)
        } else {
            Ok(focus)
        }
    }
}

/// Navigates to a value computed from the focus
///
/// A transform replaces the focus with the update applied to the computed value.
#[derive(Clone)]
pub struct View {
    project: Arc<Projection>,
}

impl View {
    pub fn new<F>(project: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self {
            project: Arc::new(project),
        }
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("View")
    }
}

impl Navigator for View {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        next(cx, &(self.project)(focus))
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        next(cx, (self.project)(&focus))
    }
}

/// Pre-order walk to every value matching a predicate
///
/// Matches are not descended into. Arrays are walked by element and objects
/// by value.
#[derive(Clone)]
pub struct Walker {
    test: Arc<Predicate>,
}

impl Walker {
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            test: Arc::new(test),
        }
    }

    fn walk_select(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        if (self.test)(focus) {
            return next(cx, focus);
        }
        match focus {
            Value::Array(items) => items
                .iter()
                .try_for_each(|item| self.walk_select(cx, item, next)),
            Value::Object(map) => map
                .values()
                .try_for_each(|value| self.walk_select(cx, value, next)),
            _ => Ok(()),
        }
    }

    fn walk_transform(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        if (self.test)(&focus) {
            return next(cx, focus);
        }
        match focus {
            Value::Array(items) => items
                .into_iter()
                .map(|item| self.walk_transform(cx, item, next))
                .collect::<PathResult<Vec<_>>>()
                .map(Value::Array),
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| Ok((key, self.walk_transform(cx, value, next)?)))
                .collect::<PathResult<serde_json::Map<_, _>>>()
                .map(Value::Object),
            other => Ok(other),
        }
    }
}

impl fmt::Debug for Walker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Walker")
    }
}

impl Navigator for Walker {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        self.walk_select(cx, focus, next)
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        self.walk_transform(cx, focus, next)
    }
}

/// The identity path step
#[must_use]
pub fn stay() -> Path {
    Path::from_navigator(Stay)
}

/// A step that navigates nowhere
#[must_use]
pub fn stop() -> Path {
    Path::from_navigator(Stop)
}

/// Keep the focus where `test` holds
#[must_use]
pub fn pred<F>(test: F) -> Path
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Path::from_navigator(Pred::new(test))
}

/// Navigate to `project(focus)`
#[must_use]
pub fn view<F>(project: F) -> Path
where
    F: Fn(&Value) -> Value + Send + Sync + 'static,
{
    Path::from_navigator(View::new(project))
}

/// Walk to every value matching `test`
#[must_use]
pub fn walker<F>(test: F) -> Path
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Path::from_navigator(Walker::new(test))
}
