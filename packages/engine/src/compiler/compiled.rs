use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::template::Template;
use crate::binder::ParamSlot;
use crate::config::ConfigDefaults;
use crate::error::{PathResult, arity_mismatch};
use crate::navigator::{Context, NavRef, UpdateFn};
use crate::telemetry::global_stats;

/// One selected value together with the values collected on the way to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// Collected values, in path order
    pub collected: Vec<Value>,
    /// The selected value
    pub value: Value,
}

/// A path compiled into a single fused navigator
///
/// Cheap to clone and safe to share across threads. A compiled path with
/// late-bound parameters is a template: it must be bound with
/// [`CompiledPath::bind`] before it can run.
#[derive(Clone)]
pub struct CompiledPath {
    pub(crate) template: Arc<Template>,
    pub(crate) params: Arc<[ParamSlot]>,
    pub(crate) nav: Option<NavRef>,
    pub(crate) max_depth: Option<usize>,
}

impl CompiledPath {
    pub(crate) fn from_template(template: Template, max_depth: Option<usize>) -> PathResult<Self> {
        let mut params = Vec::new();
        template.collect_params(&mut params);
        let nav = if params.is_empty() {
            Some(template.instantiate(&mut [].iter())?)
        } else {
            None
        };
        Ok(Self {
            template: Arc::new(template),
            params: params.into(),
            nav,
            max_depth,
        })
    }

    pub(crate) fn concrete(nav: NavRef, max_depth: Option<usize>) -> Self {
        Self {
            template: Arc::new(Template::ready(nav.clone())),
            params: Arc::from(Vec::new()),
            nav: Some(nav),
            max_depth,
        }
    }

    /// Number of arguments [`CompiledPath::bind`] expects
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Unresolved parameter slots, in binding order
    #[must_use]
    pub fn params(&self) -> &[ParamSlot] {
        &self.params
    }

    /// True once every parameter has been supplied
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.nav.is_some()
    }

    #[must_use]
    pub fn max_recursion_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Cap the recursion depth for this compiled path
    ///
    /// Limits above `ConfigDefaults::MAX_RECURSION_DEPTH` are clamped to it.
    #[must_use]
    pub fn with_recursion_limit(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth.min(ConfigDefaults::MAX_RECURSION_DEPTH));
        self
    }

    /// Let recursion depth follow the data
    #[must_use]
    pub fn without_recursion_limit(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// The fused navigator
    ///
    /// # Errors
    ///
    /// Returns `PathError::ArityMismatch` while parameters are unbound.
    pub fn navigator(&self) -> PathResult<&NavRef> {
        self.nav
            .as_ref()
            .ok_or_else(|| arity_mismatch("unbound compiled path", self.arity(), 0))
    }

    /// Every value the path reaches, in traversal order
    ///
    /// # Errors
    ///
    /// Returns `PathError::ArityMismatch` for unbound paths, otherwise any
    /// navigation error.
    pub fn select(&self, structure: &Value) -> PathResult<Vec<Value>> {
        let result = self.run_select(structure, |_, value, out: &mut Vec<Value>| {
            out.push(value.clone());
        });
        global_stats().record_select(result.is_ok());
        result
    }

    /// Every value the path reaches, paired with its collected values
    ///
    /// # Errors
    ///
    /// Same as [`CompiledPath::select`].
    pub fn select_with_collected(&self, structure: &Value) -> PathResult<Vec<Selection>> {
        let result = self.run_select(structure, |cx, value, out: &mut Vec<Selection>| {
            out.push(Selection {
                collected: cx.collected().to_vec(),
                value: value.clone(),
            });
        });
        global_stats().record_select(result.is_ok());
        result
    }

    fn run_select<T>(
        &self,
        structure: &Value,
        mut emit: impl FnMut(&Context, &Value, &mut Vec<T>),
    ) -> PathResult<Vec<T>> {
        let nav = self.navigator()?;
        let mut cx = Context::new(self.max_depth);
        let mut out = Vec::new();
        nav.select_step(&mut cx, structure, &mut |cx: &mut Context, value: &Value| {
            emit(cx, value, &mut out);
            Ok(())
        })?;
        Ok(out)
    }

    /// Replace every reached value with `update(collected..., value)`
    ///
    /// # Errors
    ///
    /// Returns `PathError::ArityMismatch` for unbound paths or an update
    /// function whose arity disagrees with the collected values, otherwise any
    /// navigation error.
    pub fn transform(&self, update: &UpdateFn, structure: Value) -> PathResult<Value> {
        let result = self.navigator().and_then(|nav| {
            let mut cx = Context::new(self.max_depth);
            nav.transform_step(&mut cx, structure, &mut |cx: &mut Context, value: Value| {
                update.apply(cx.collected(), value)
            })
        });
        global_stats().record_transform(result.is_ok());
        if let Err(err) = &result {
            tracing::debug!(target: "navpath::compiled", error = %err, "transform failed");
        }
        result
    }

    /// Replace every reached value with `value`, ignoring collected values
    ///
    /// # Errors
    ///
    /// Same as [`CompiledPath::transform`].
    pub fn setval(&self, value: Value, structure: Value) -> PathResult<Value> {
        self.transform(&UpdateFn::constant(value), structure)
    }
}

impl fmt::Debug for CompiledPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPath")
            .field("arity", &self.arity())
            .field("bound", &self.is_bound())
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
