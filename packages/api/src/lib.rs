//! Navpath Public API
//!
//! Compiled navigation paths over nested immutable data. Build a [`Path`],
//! then select every value it reaches or rebuild the structure with those
//! values transformed. Paths compile into a single fused traversal, and
//! compiled paths with late-bound parameters can be bound many times.

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod prelude;

// Re-export the engine surface
pub use navpath_engine::{
    Branch, CompiledPath, Context, DispatchPolicy, EngineConfig, ErrorPhase, LateBound, NavRef,
    Navigator, ParamSlot, Path, PathElem, PathError, PathResult, ProtocolOptions, ProtocolPath,
    RecursivePath, Selection, TypeTag, TypeTagger, UpdateFn, init_global_config,
};
pub use navpath_engine::{combinators, navigators, operations, telemetry};

use serde_json::Value;

/// Main entry point providing static path operations
pub struct Nav;

impl Nav {
    /// The empty path
    ///
    /// Shorthand for `Path::new()`
    #[must_use]
    pub fn path() -> Path {
        Path::new()
    }

    /// Every value `path` reaches in `structure`
    ///
    /// # Errors
    ///
    /// See [`operations::select`].
    pub fn select(path: &Path, structure: &Value) -> PathResult<Vec<Value>> {
        operations::select(path, structure)
    }

    /// `structure` with `update` applied at every reached location
    ///
    /// # Errors
    ///
    /// See [`operations::transform`].
    pub fn transform(path: &Path, update: &UpdateFn, structure: Value) -> PathResult<Value> {
        operations::transform(path, update, structure)
    }

    /// `structure` with every reached location replaced by `value`
    ///
    /// # Errors
    ///
    /// See [`operations::setval`].
    pub fn setval(path: &Path, value: Value, structure: Value) -> PathResult<Value> {
        operations::setval(path, value, structure)
    }

    /// Compile `path` for repeated use
    ///
    /// # Errors
    ///
    /// See [`operations::compile_path`].
    pub fn compile(path: &Path) -> PathResult<CompiledPath> {
        operations::compile_path(path)
    }
}

/// Every value `path` reaches in `structure`
///
/// Shorthand for `Nav::select()`
///
/// # Errors
///
/// See [`operations::select`].
pub fn select(path: &Path, structure: &Value) -> PathResult<Vec<Value>> {
    Nav::select(path, structure)
}

/// Shorthand for `Nav::transform()`
///
/// # Errors
///
/// See [`operations::transform`].
pub fn transform(path: &Path, update: &UpdateFn, structure: Value) -> PathResult<Value> {
    Nav::transform(path, update, structure)
}

/// Shorthand for `Nav::setval()`
///
/// # Errors
///
/// See [`operations::setval`].
pub fn setval(path: &Path, value: Value, structure: Value) -> PathResult<Value> {
    Nav::setval(path, value, structure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_facade_round_trip() {
        let path = Nav::path().key("a").all();
        let data = json!({"a": [1, 2]});
        assert_eq!(select(&path, &data).expect("select"), vec![json!(1), json!(2)]);
        assert_eq!(
            setval(&path, json!(0), data).expect("setval"),
            json!({"a": [0, 0]})
        );
        assert_eq!(Nav::compile(&path).expect("compiles").arity(), 0);
    }
}
