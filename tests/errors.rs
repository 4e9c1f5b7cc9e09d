//! Error handling tests
//!
//! Every error kind, its phase classification, and the guarantee that a
//! failed transform yields no partial structure.

use navpath::prelude::*;
use navpath::{ErrorPhase, EngineConfig, init_global_config};
use serde_json::{Value, json};

#[cfg(test)]
mod arity_tests {
    use super::*;

    #[test]
    fn test_bind_with_wrong_argument_count() {
        let template = compile_path(&late::keypath().then(late::srange())).expect("compiles");
        assert_eq!(template.arity(), 3);
        for count in [0, 1, 2, 4] {
            let args = vec![json!(0); count];
            let err = bind_parameters(&template, &args).expect_err("wrong count");
            assert!(err.is_arity_mismatch(), "{count} arguments: {err}");
            assert_eq!(err.phase(), ErrorPhase::Run);
        }
    }

    #[test]
    fn test_update_arity_must_match_collected_values() {
        let path = collect_one(keypath("n")).then(keypath("v"));
        let data = json!({"n": 1, "v": 2});

        let err = transform(&path, &UpdateFn::unary(|v| v), data.clone()).expect_err("too few");
        assert!(err.is_arity_mismatch());

        let err = transform(
            &path,
            &UpdateFn::ternary(|_, _, v| v),
            data.clone(),
        )
        .expect_err("too many");
        assert!(err.is_arity_mismatch());

        let updated = transform(
            &path,
            &UpdateFn::binary(|n, v| json!(n.as_i64().unwrap_or(0) + v.as_i64().unwrap_or(0))),
            data,
        )
        .expect("matching arity");
        assert_eq!(updated, json!({"n": 1, "v": 3}));
    }

    #[test]
    fn test_running_an_unbound_template_fails() {
        let template = compile_path(&late::keypath()).expect("compiles");
        let err = template.select(&json!({})).expect_err("unbound");
        assert!(err.is_arity_mismatch());
        let err = select(&late::nth(), &json!([1])).expect_err("unbound path");
        assert!(err.is_arity_mismatch());
    }
}

#[cfg(test)]
mod setup_tests {
    use super::*;

    #[test]
    fn test_recursive_provision_errors() {
        let cell = declare_recursive_path("tree");
        let err = select(&cell.path(), &json!(1)).expect_err("unprovided");
        assert_eq!(
            err,
            PathError::UnprovidedRecursivePath {
                name: "tree".into()
            }
        );
        assert_eq!(err.phase(), ErrorPhase::Run);

        provide(&cell, stay()).expect("first provide");
        let err = provide(&cell, stay()).expect_err("second provide");
        assert_eq!(err, PathError::DoubleProvision { name: "tree".into() });
        assert!(err.is_compile_time());
    }

    #[test]
    fn test_duplicate_dispatch_is_compile_time() {
        let protocol = declare_protocol_path("shapes");
        register_dispatch(&protocol, "Circle", keypath("radius")).expect("register");
        let err = register_dispatch(&protocol, "Circle", keypath("r")).expect_err("duplicate");
        assert!(err.is_compile_time());
    }

    #[test]
    fn test_unmatched_dispatch_is_run_time() {
        let protocol = declare_protocol_path("shapes");
        register_dispatch(&protocol, "Circle", keypath("radius")).expect("register");
        let err = select(&protocol.path(), &json!({"@type": "Square"})).expect_err("unmatched");
        assert_eq!(err.phase(), ErrorPhase::Run);
        assert!(err.to_string().contains("Square"));
    }

    #[test]
    fn test_malformed_paths() {
        let cases: Vec<(Path, &str)> = vec![
            (multi_path(Vec::new()), "multi_path without branches"),
            (cond_path(Vec::new()), "cond_path without branches"),
            (
                keypath("a").then(collect_one(multi_path(Vec::new()))),
                "nested empty multi_path",
            ),
        ];
        for (path, description) in cases {
            let err = compile_path(&path).expect_err(description);
            assert!(matches!(err, PathError::MalformedPath(_)), "{description}");
            assert!(err.is_compile_time(), "{description}");
        }
    }

    #[test]
    fn test_invalid_bound_argument() {
        let template = compile_path(&late::nth()).expect("compiles");
        let err = template.bind(&[json!("first")]).expect_err("not an integer");
        assert!(matches!(err, PathError::InvalidParameter { .. }));
        assert!(srange(5, 1).is_err());
    }
}

#[cfg(test)]
mod propagation_tests {
    use super::*;

    #[test]
    fn test_failed_transform_returns_no_partial_structure() {
        let path = all();
        let failing = UpdateFn::try_variadic(|_, v: Value| {
            if v == json!(3) {
                Err(refusal("refusing 3"))
            } else {
                Ok(json!(0))
            }
        });
        let data = json!([1, 2, 3, 4]);
        let result = transform(&path, &failing, data.clone());
        assert!(result.is_err());
        assert_eq!(data, json!([1, 2, 3, 4]));
    }

    fn refusal(message: &str) -> PathError {
        PathError::Navigation {
            navigator: "test".into(),
            message: message.into(),
        }
    }

    #[test]
    fn test_recursion_limit_from_configuration() {
        env_logger::try_init().ok();
        let config = EngineConfig::default().with_max_recursion_depth(32);
        init_global_config(config).expect("first install");
        assert!(init_global_config(EngineConfig::default()).is_err());

        let cell = declare_recursive_path("loop");
        provide(&cell, cell.path()).expect("provide");
        let err = select(&cell.path(), &json!(null)).expect_err("runaway recursion");
        assert_eq!(
            err,
            PathError::RecursionLimit {
                name: "loop".into(),
                limit: 32
            }
        );
    }
}
