use serde_json::Value;

use crate::error::PathResult;
use crate::navigator::{Context, NavRef, Navigator, SelectFn, TransformFn};
use crate::navigators::stay_navigator;

/// A run of navigators executed as one step
///
/// Each step's continuation is the next step, so a select over the whole chain
/// is a single nested traversal with no intermediate result lists.
#[derive(Debug)]
pub struct FusedChain {
    steps: Box<[NavRef]>,
}

impl FusedChain {
    /// Number of fused steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for chains produced by the compiler
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn select_from(
        &self,
        index: usize,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        match self.steps.get(index) {
            None => next(cx, focus),
            Some(step) => step.select_step(cx, focus, &mut |cx: &mut Context, value: &Value| {
                self.select_from(index + 1, cx, value, next)
            }),
        }
    }

    fn transform_from(
        &self,
        index: usize,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        match self.steps.get(index) {
            None => next(cx, focus),
            Some(step) => step.transform_step(cx, focus, &mut |cx: &mut Context, value: Value| {
                self.transform_from(index + 1, cx, value, next)
            }),
        }
    }
}

impl Navigator for FusedChain {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        self.select_from(0, cx, focus, next)
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        self.transform_from(0, cx, focus, next)
    }
}

/// Collapse a step list into one navigator
pub(crate) fn fuse(steps: Vec<NavRef>) -> NavRef {
    let mut steps: Vec<NavRef> = steps.into_iter().filter(|nav| !nav.is_identity()).collect();
    match steps.len() {
        0 => stay_navigator(),
        1 => steps.pop().unwrap_or_else(stay_navigator),
        _ => std::sync::Arc::new(FusedChain {
            steps: steps.into_boxed_slice(),
        }),
    }
}
