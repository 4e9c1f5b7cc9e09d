//! Navigator capability contract
//!
//! Every traversal step, built-in or combinator, implements [`Navigator`]: a
//! `select_step` that yields each location it exposes to a continuation, and a
//! `transform_step` that rebuilds the focused value with the continuation's
//! result written back at exactly those locations.
//!
//! The two halves must agree on which locations they touch and in which order.
//! `select` and `transform` over the same path silently diverge otherwise.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{PathResult, recursion_limit};

pub mod update;

pub use update::UpdateFn;

/// Continuation receiving each value a select step exposes
pub type SelectFn<'a> = dyn FnMut(&mut Context, &Value) -> PathResult<()> + 'a;

/// Continuation producing the replacement for each location a transform step exposes
pub type TransformFn<'a> = dyn FnMut(&mut Context, Value) -> PathResult<Value> + 'a;

/// Shared handle to a navigator
pub type NavRef = Arc<dyn Navigator>;

/// A single step of traversal
pub trait Navigator: Send + Sync + fmt::Debug {
    /// Call `next` once per value exposed at this step, in a defined order
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `next`, plus navigator-specific failures.
    fn select_step(&self, cx: &mut Context, focus: &Value, next: &mut SelectFn<'_>)
    -> PathResult<()>;

    /// Return `focus` with `next` applied at each exposed location
    ///
    /// Everything the step does not expose must come back structurally equal.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `next`, plus navigator-specific failures.
    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value>;

    /// True if this step exposes exactly the focus and nothing else
    ///
    /// The compiler drops identity steps from fused chains.
    fn is_identity(&self) -> bool {
        false
    }
}

/// Per-invocation traversal state
///
/// Holds the collected-value stack threaded to update functions and the
/// recursion depth of the current call chain. A context is created fresh for
/// every top-level invocation and is never shared between invocations.
/// Without a limit, re-entry depth follows the data.
#[derive(Debug, Clone)]
pub struct Context {
    collected: Vec<Value>,
    depth: usize,
    max_depth: Option<usize>,
}

impl Context {
    /// Create an empty context with an optional re-entry limit
    #[must_use]
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            collected: Vec::new(),
            depth: 0,
            max_depth,
        }
    }

    /// Values collected so far, in path order
    #[inline]
    #[must_use]
    pub fn collected(&self) -> &[Value] {
        &self.collected
    }

    /// Current recursive re-entry depth
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Run `f` with `value` appended to the collected values
    ///
    /// The value is removed again once `f` returns, so sibling locations never
    /// observe each other's collections.
    pub fn with_collected<R>(&mut self, value: Value, f: impl FnOnce(&mut Self) -> R) -> R {
        let mark = self.collected.len();
        self.collected.push(value);
        let result = f(self);
        self.collected.truncate(mark);
        result
    }

    /// A context for an independent sub-traversal from the current focus
    ///
    /// Starts with no collected values but inherits depth and limit.
    #[must_use]
    pub fn nested(&self) -> Self {
        Self {
            collected: Vec::new(),
            depth: self.depth,
            max_depth: self.max_depth,
        }
    }

    /// Enter a recursive or protocol path named `name`
    ///
    /// # Errors
    ///
    /// Returns `PathError::RecursionLimit` once a configured limit is reached.
    pub fn descend<R>(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut Self) -> PathResult<R>,
    ) -> PathResult<R> {
        if let Some(limit) = self.max_depth.filter(|&limit| self.depth >= limit) {
            tracing::debug!(
                target: "navpath::recursive",
                name,
                limit,
                "recursion depth limit reached"
            );
            return Err(recursion_limit(name, limit));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

/// Select every value `nav` exposes from `focus` in an independent sub-traversal
///
/// # Errors
///
/// Propagates navigator errors.
pub fn select_values(nav: &dyn Navigator, cx: &Context, focus: &Value) -> PathResult<Vec<Value>> {
    let mut sub = cx.nested();
    let mut out = Vec::new();
    nav.select_step(&mut sub, focus, &mut |_: &mut Context, value: &Value| {
        out.push(value.clone());
        Ok(())
    })?;
    Ok(out)
}

/// True if `nav` exposes at least one value from `focus`
///
/// # Errors
///
/// Propagates navigator errors.
pub fn selects_any(nav: &dyn Navigator, cx: &Context, focus: &Value) -> PathResult<bool> {
    let mut sub = cx.nested();
    let mut found = false;
    nav.select_step(&mut sub, focus, &mut |_: &mut Context, _: &Value| {
        found = true;
        Ok(())
    })?;
    Ok(found)
}

/// Transform `focus` through `nav` in an independent sub-traversal
///
/// # Errors
///
/// Propagates navigator and update-function errors.
pub fn transform_value(
    nav: &dyn Navigator,
    cx: &Context,
    focus: Value,
    update: &UpdateFn,
) -> PathResult<Value> {
    let mut sub = cx.nested();
    nav.transform_step(&mut sub, focus, &mut |cx: &mut Context, value: Value| {
        update.apply(cx.collected(), value)
    })
}
