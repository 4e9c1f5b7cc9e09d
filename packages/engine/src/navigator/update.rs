//! Terminal update functions
//!
//! An update function receives the collected values as a positional prefix,
//! followed by the finally-focused value. Functions with a declared arity are
//! checked against the collected context on every call.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{PathResult, arity_mismatch};

type UpdateBody = dyn Fn(&[Value], Value) -> PathResult<Value> + Send + Sync;

/// Update function applied at every location a transform reaches
#[derive(Clone)]
pub struct UpdateFn {
    name: Cow<'static, str>,
    arity: Option<usize>,
    body: Arc<UpdateBody>,
}

impl UpdateFn {
    /// A function of the focused value only; no collected values allowed
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self::with_arity(1, move |_, focus| Ok(f(focus)))
    }

    /// A function of one collected value and the focused value
    pub fn binary<F>(f: F) -> Self
    where
        F: Fn(&Value, Value) -> Value + Send + Sync + 'static,
    {
        Self::with_arity(2, move |collected, focus| match collected {
            [a] => Ok(f(a, focus)),
            _ => Err(arity_mismatch("update function", 2, collected.len() + 1)),
        })
    }

    /// A function of two collected values and the focused value
    pub fn ternary<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value, Value) -> Value + Send + Sync + 'static,
    {
        Self::with_arity(3, move |collected, focus| match collected {
            [a, b] => Ok(f(a, b, focus)),
            _ => Err(arity_mismatch("update function", 3, collected.len() + 1)),
        })
    }

    /// A fallible function with an explicit total arity (collected + 1)
    pub fn with_arity<F>(arity: usize, f: F) -> Self
    where
        F: Fn(&[Value], Value) -> PathResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: Cow::Borrowed("update"),
            arity: Some(arity),
            body: Arc::new(f),
        }
    }

    /// A function accepting any number of collected values
    pub fn variadic<F>(f: F) -> Self
    where
        F: Fn(&[Value], Value) -> Value + Send + Sync + 'static,
    {
        Self::try_variadic(move |collected, focus| Ok(f(collected, focus)))
    }

    /// A fallible function accepting any number of collected values
    pub fn try_variadic<F>(f: F) -> Self
    where
        F: Fn(&[Value], Value) -> PathResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: Cow::Borrowed("update"),
            arity: None,
            body: Arc::new(f),
        }
    }

    /// Replace every location with `value`, ignoring collected values
    #[must_use]
    pub fn constant(value: Value) -> Self {
        Self::variadic(move |_, _| value.clone()).named("constant")
    }

    /// Leave every location unchanged
    #[must_use]
    pub fn identity() -> Self {
        Self::variadic(|_, focus| focus).named("identity")
    }

    /// Attach a name used in error messages and debug output
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Declared total arity, or `None` for variadic functions
    #[inline]
    #[must_use]
    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    /// Function name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke with the collected prefix and the focused value
    ///
    /// # Errors
    ///
    /// Returns `PathError::ArityMismatch` if the declared arity is not
    /// `collected.len() + 1`, or whatever the function itself returns.
    pub fn apply(&self, collected: &[Value], focus: Value) -> PathResult<Value> {
        if let Some(expected) = self.arity {
            let actual = collected.len() + 1;
            if expected != actual {
                return Err(arity_mismatch(
                    format!("update function '{}'", self.name),
                    expected,
                    actual,
                ));
            }
        }
        (self.body)(collected, focus)
    }
}

impl fmt::Debug for UpdateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateFn")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unary_rejects_collected_values() {
        let inc = UpdateFn::unary(|v| json!(v.as_i64().unwrap_or(0) + 1)).named("inc");
        assert_eq!(inc.apply(&[], json!(1)).expect("unary with no context"), json!(2));

        let err = inc
            .apply(&[json!(10)], json!(1))
            .expect_err("one collected value is too many for a unary function");
        assert_eq!(
            err,
            crate::error::PathError::ArityMismatch {
                context: "update function 'inc'".into(),
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn test_binary_receives_collected_prefix() {
        let add = UpdateFn::binary(|b, a| json!(a.as_i64().unwrap_or(0) + b.as_i64().unwrap_or(0)));
        assert_eq!(add.apply(&[json!(3)], json!(4)).expect("binary add"), json!(7));
        assert!(add.apply(&[], json!(4)).is_err());
    }

    #[test]
    fn test_ternary_argument_order() {
        let list = UpdateFn::ternary(|a, b, v| json!([a, b, v]));
        assert_eq!(
            list.apply(&[json!("first"), json!("second")], json!("focus"))
                .expect("ternary"),
            json!(["first", "second", "focus"])
        );
    }

    #[test]
    fn test_variadic_constant_and_identity() {
        let constant = UpdateFn::constant(json!(0));
        assert_eq!(constant.arity(), None);
        assert_eq!(
            constant.apply(&[json!(1), json!(2)], json!(9)).expect("constant"),
            json!(0)
        );
        assert_eq!(
            UpdateFn::identity().apply(&[json!(1)], json!("x")).expect("identity"),
            json!("x")
        );
    }
}
