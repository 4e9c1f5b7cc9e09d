//! Late-bound navigator forms
//!
//! Each function returns a one-element path holding a placeholder. The
//! arguments are supplied later through `CompiledPath::bind`, in the order
//! the placeholders appear in the path.

use std::sync::Arc;

use serde_json::Value;

use super::{Key, Keypath, Must, Nth, Srange};
use crate::binder::LateBound;
use crate::combinators::InjectConstant;
use crate::error::{PathResult, arity_mismatch, invalid_parameter};
use crate::navigator::NavRef;
use crate::path::Path;

fn integer(navigator: &str, value: &Value) -> PathResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| invalid_parameter(navigator, format!("expected an integer, got {value}")))
}

fn bound(navigator: &str, value: &Value) -> PathResult<usize> {
    let n = integer(navigator, value)?;
    usize::try_from(n)
        .map_err(|_| invalid_parameter(navigator, format!("expected a non-negative bound, got {n}")))
}

fn single<'a>(navigator: &str, args: &'a [Value]) -> PathResult<&'a Value> {
    match args {
        [value] => Ok(value),
        _ => Err(arity_mismatch(navigator.to_owned(), 1, args.len())),
    }
}

/// `keypath` with the key supplied at bind time
#[must_use]
pub fn keypath() -> Path {
    LateBound::new("keypath", 1, |args| {
        let key = Key::from_value("keypath", single("keypath", args)?)?;
        let nav: NavRef = Arc::new(Keypath::new(key));
        Ok(nav)
    })
    .into_path()
}

/// `must` with the key supplied at bind time
#[must_use]
pub fn must() -> Path {
    LateBound::new("must", 1, |args| {
        let key = Key::from_value("must", single("must", args)?)?;
        let nav: NavRef = Arc::new(Must::new(key));
        Ok(nav)
    })
    .into_path()
}

/// `nth` with the index supplied at bind time
#[must_use]
pub fn nth() -> Path {
    LateBound::new("nth", 1, |args| {
        let index = integer("nth", single("nth", args)?)?;
        let nav: NavRef = Arc::new(Nth::new(index));
        Ok(nav)
    })
    .into_path()
}

/// `srange` with both bounds supplied at bind time
#[must_use]
pub fn srange() -> Path {
    LateBound::new("srange", 2, |args| match args {
        [start, end] => {
            let range = Srange::new(bound("srange", start)?, bound("srange", end)?)?;
            let nav: NavRef = Arc::new(range);
            Ok(nav)
        }
        _ => Err(arity_mismatch("srange", 2, args.len())),
    })
    .into_path()
}

/// Collect a value supplied at bind time
#[must_use]
pub fn putval() -> Path {
    LateBound::new("putval", 1, |args| {
        let nav: NavRef = Arc::new(InjectConstant::new(single("putval", args)?.clone()));
        Ok(nav)
    })
    .into_path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathError;
    use crate::navigators::all;
    use serde_json::json;

    #[test]
    fn test_late_keypath_rejects_bad_key() {
        let compiled = keypath().compile().expect("compiles");
        let err = compiled.bind(&[json!(true)]).expect_err("bool key");
        assert!(matches!(err, PathError::InvalidParameter { .. }));
    }

    #[test]
    fn test_late_srange_and_nth() {
        let compiled = srange().then(nth()).compile().expect("compiles");
        let bound = compiled
            .bind(&[json!(1), json!(4), json!(-1)])
            .expect("binds");
        assert_eq!(
            bound.select(&json!([0, 1, 2, 3, 4, 5])).expect("select"),
            vec![json!(3)]
        );

        let bound = srange().then(all()).compile().expect("compiles");
        let bound = bound.bind(&[json!(1), json!(3)]).expect("binds");
        assert_eq!(
            bound.select(&json!([0, 1, 2, 3])).expect("select"),
            vec![json!(1), json!(2)]
        );
        assert!(
            srange()
                .compile()
                .expect("compiles")
                .bind(&[json!(3), json!(1)])
                .is_err()
        );
    }

    #[test]
    fn test_putval_collects_bound_value() {
        let compiled = putval()
            .then(crate::navigators::keypath("a"))
            .compile()
            .expect("compiles");
        let bound = compiled.bind(&[json!(10)]).expect("binds");
        let updated = bound
            .transform(
                &crate::navigator::UpdateFn::binary(|k, v| {
                    json!(k.as_i64().unwrap_or(0) + v.as_i64().unwrap_or(0))
                }),
                json!({"a": 1}),
            )
            .expect("transform");
        assert_eq!(updated, json!({"a": 11}));
    }
}
