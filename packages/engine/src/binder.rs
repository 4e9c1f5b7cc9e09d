//! Late-bound parameterization
//!
//! A parameterized navigator placed in a path without its arguments becomes a
//! [`LateBound`] placeholder that declares its own arity. Compilation gathers
//! every placeholder, left to right, into one ordered parameter list on the
//! [`CompiledPath`]. [`CompiledPath::bind`] then hands the arguments back to
//! each placeholder's constructor in that order and returns a new, fully
//! concrete compiled path. The template it was bound from is left untouched.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::compiler::CompiledPath;
use crate::error::{PathResult, arity_mismatch};
use crate::navigator::NavRef;
use crate::path::{Path, PathElem};
use crate::telemetry::global_stats;

type Build = dyn Fn(&[Value]) -> PathResult<NavRef> + Send + Sync;

/// Placeholder for a navigator whose arguments are supplied after compilation
#[derive(Clone)]
pub struct LateBound {
    name: Cow<'static, str>,
    arity: usize,
    build: Arc<Build>,
}

impl LateBound {
    /// Create a placeholder that builds its navigator from `arity` arguments
    pub fn new<F>(name: impl Into<Cow<'static, str>>, arity: usize, build: F) -> Self
    where
        F: Fn(&[Value]) -> PathResult<NavRef> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            build: Arc::new(build),
        }
    }

    /// Navigator name, used in parameter slots and errors
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of arguments this placeholder consumes
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Build the concrete navigator from exactly `arity` arguments
    ///
    /// # Errors
    ///
    /// Returns `PathError::ArityMismatch` for the wrong argument count, or
    /// whatever the constructor rejects.
    pub fn bind(&self, args: &[Value]) -> PathResult<NavRef> {
        if args.len() != self.arity {
            return Err(arity_mismatch(
                format!("late-bound '{}'", self.name),
                self.arity,
                args.len(),
            ));
        }
        (self.build)(args)
    }

    /// A single-element path holding this placeholder
    #[must_use]
    pub fn into_path(self) -> Path {
        Path::from_elem(PathElem::Late(self))
    }
}

impl fmt::Debug for LateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LateBound")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// One unresolved argument position of a compiled path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSlot {
    /// Position in the argument list passed to `bind`
    pub position: usize,
    /// Navigator that consumes the argument
    pub navigator: String,
    /// Index of the argument within that navigator's own arity
    pub argument: usize,
}

impl CompiledPath {
    /// Supply runtime arguments for every late-bound placeholder
    ///
    /// Arguments are distributed positionally in [`CompiledPath::params`]
    /// order. Binding a parameter-free path with no arguments returns it
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `PathError::ArityMismatch` unless `args.len()` equals
    /// [`CompiledPath::arity`], or any error raised by a placeholder's
    /// constructor.
    pub fn bind(&self, args: &[Value]) -> PathResult<CompiledPath> {
        let expected = self.arity();
        if args.len() != expected {
            return Err(arity_mismatch("bind_parameters", expected, args.len()));
        }
        if expected == 0 {
            return Ok(self.clone());
        }

        let mut remaining = args.iter();
        let nav = self.template.instantiate(&mut remaining)?;
        global_stats().record_binding();
        tracing::trace!(
            target: "navpath::binder",
            arity = expected,
            "bound late parameters"
        );
        Ok(CompiledPath::concrete(nav, self.max_depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigators::{all, late, pred};
    use serde_json::json;

    fn odd(value: &Value) -> bool {
        value.as_i64().is_some_and(|n| n % 2 != 0)
    }

    #[test]
    fn test_params_are_listed_left_to_right() {
        let compiled = late::keypath()
            .then(all())
            .then(late::srange())
            .compile()
            .expect("compiles");
        assert_eq!(compiled.arity(), 3);
        let names: Vec<(usize, &str, usize)> = compiled
            .params()
            .iter()
            .map(|slot| (slot.position, slot.navigator.as_str(), slot.argument))
            .collect();
        assert_eq!(
            names,
            vec![(0, "keypath", 0), (1, "srange", 0), (2, "srange", 1)]
        );
    }

    #[test]
    fn test_bind_produces_concrete_path() {
        let compiled = late::keypath()
            .then(all())
            .then(pred(odd))
            .compile()
            .expect("compiles");
        assert!(!compiled.is_bound());

        let data = json!({"a": [1, 2, 3], "b": [5, 6]});
        let bound_a = compiled.bind(&[json!("a")]).expect("binds");
        let bound_b = compiled.bind(&[json!("b")]).expect("binds again");
        assert!(bound_a.is_bound());
        assert_eq!(bound_a.arity(), 0);
        assert_eq!(bound_a.select(&data).expect("select a"), vec![json!(1), json!(3)]);
        assert_eq!(bound_b.select(&data).expect("select b"), vec![json!(5)]);

        // the template is still unbound
        assert_eq!(compiled.arity(), 1);
        assert!(compiled.select(&data).is_err());
    }

    #[test]
    fn test_bind_rejects_wrong_argument_count() {
        let compiled = late::keypath().compile().expect("compiles");
        let err = compiled.bind(&[]).expect_err("missing argument");
        assert_eq!(err, arity_mismatch("bind_parameters", 1, 0));

        let err = compiled
            .bind(&[json!("a"), json!("b")])
            .expect_err("extra argument");
        assert_eq!(err, arity_mismatch("bind_parameters", 1, 2));
    }

    #[test]
    fn test_binding_a_bound_path_is_idempotent() {
        let compiled = all().compile().expect("compiles");
        let rebound = compiled.bind(&[]).expect("no parameters to bind");
        assert_eq!(
            rebound.select(&json!([1, 2])).expect("select"),
            vec![json!(1), json!(2)]
        );
        assert!(compiled.bind(&[json!(1)]).is_err());
    }

    #[test]
    fn test_late_bound_rejects_wrong_argument_count() {
        let late = LateBound::new("pair", 2, |_| Ok(crate::navigators::stay_navigator()));
        assert!(late.bind(&[json!(1)]).is_err());
        assert!(late.bind(&[json!(1), json!(2)]).is_ok());
    }
}
