use serde_json::Value;

use crate::error::PathResult;
use crate::navigator::{Context, NavRef, Navigator, SelectFn, TransformFn, selects_any};
use crate::path::{Branch, Path, PathElem};

/// Conditional navigation
///
/// The condition is evaluated against the focus in an independent
/// sub-traversal; only whether it selects anything matters. Without an else
/// branch a failed condition navigates nowhere.
#[derive(Debug)]
pub struct IfPath {
    cond: NavRef,
    then: NavRef,
    otherwise: Option<NavRef>,
}

impl IfPath {
    #[must_use]
    pub fn new(cond: NavRef, then: NavRef, otherwise: Option<NavRef>) -> Self {
        Self {
            cond,
            then,
            otherwise,
        }
    }

    fn branch(&self, cx: &Context, focus: &Value) -> PathResult<Option<&NavRef>> {
        if selects_any(self.cond.as_ref(), cx, focus)? {
            Ok(Some(&self.then))
        } else {
            Ok(self.otherwise.as_ref())
        }
    }
}

impl Navigator for IfPath {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        match self.branch(cx, focus)? {
            Some(path) => path.select_step(cx, focus, next),
            None => Ok(()),
        }
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        match self.branch(cx, &focus)? {
            Some(path) => path.transform_step(cx, focus, next),
            None => Ok(focus),
        }
    }
}

/// Follows every branch whose guard selects anything, in branch order
///
/// A transform threads the focus through the applicable branches one after
/// another; each guard sees the result of the branches before it.
#[derive(Debug)]
pub struct MultiPath {
    branches: Vec<(Option<NavRef>, NavRef)>,
}

impl MultiPath {
    #[must_use]
    pub fn new(branches: Vec<(Option<NavRef>, NavRef)>) -> Self {
        Self { branches }
    }
}

fn guard_passes(guard: Option<&NavRef>, cx: &Context, focus: &Value) -> PathResult<bool> {
    match guard {
        Some(guard) => selects_any(guard.as_ref(), cx, focus),
        None => Ok(true),
    }
}

impl Navigator for MultiPath {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        for (guard, path) in &self.branches {
            if guard_passes(guard.as_ref(), cx, focus)? {
                path.select_step(cx, focus, next)?;
            }
        }
        Ok(())
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        let mut current = focus;
        for (guard, path) in &self.branches {
            if guard_passes(guard.as_ref(), cx, &current)? {
                current = path.transform_step(cx, current, next)?;
            }
        }
        Ok(current)
    }
}

/// Follows the first branch whose guard selects anything
#[derive(Debug)]
pub struct CondPath {
    pairs: Vec<(NavRef, NavRef)>,
}

impl CondPath {
    #[must_use]
    pub fn new(pairs: Vec<(NavRef, NavRef)>) -> Self {
        Self { pairs }
    }

    fn choose(&self, cx: &Context, focus: &Value) -> PathResult<Option<&NavRef>> {
        for (guard, path) in &self.pairs {
            if selects_any(guard.as_ref(), cx, focus)? {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }
}

impl Navigator for CondPath {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        match self.choose(cx, focus)? {
            Some(path) => path.select_step(cx, focus, next),
            None => Ok(()),
        }
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        match self.choose(cx, &focus)? {
            Some(path) => path.transform_step(cx, focus, next),
            None => Ok(focus),
        }
    }
}

/// Follow `then` where `cond` selects anything, `otherwise` elsewhere
#[must_use]
pub fn if_path(cond: Path, then: Path, otherwise: Option<Path>) -> Path {
    Path::from_elem(PathElem::IfPath {
        cond,
        then,
        otherwise,
    })
}

/// Follow every applicable branch
///
/// An empty branch list fails compilation with `PathError::MalformedPath`.
#[must_use]
pub fn multi_path(branches: Vec<Branch>) -> Path {
    Path::from_elem(PathElem::MultiPath(branches))
}

/// Follow the first `(guard, path)` pair whose guard selects anything
#[must_use]
pub fn cond_path(pairs: Vec<(Path, Path)>) -> Path {
    Path::from_elem(PathElem::CondPath(pairs))
}
