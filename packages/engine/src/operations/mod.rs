//! Entry points
//!
//! Free functions over paths and compiled paths. The path-taking forms compile
//! through [`Path::compiled`], so repeated calls with the same `Path` value
//! compile once when caching is enabled.

use serde_json::Value;

use crate::compiler::{CompiledPath, Selection};
use crate::error::{PathResult, navigation};
use crate::navigator::UpdateFn;
use crate::path::Path;
use crate::protocol::{ProtocolPath, TypeTag};
use crate::recursive::RecursivePath;

/// Every value `path` reaches in `structure`, in traversal order
///
/// # Errors
///
/// Compilation errors, `ArityMismatch` for paths with unbound parameters,
/// and any navigation error.
pub fn select(path: &Path, structure: &Value) -> PathResult<Vec<Value>> {
    path.compiled()?.select(structure)
}

/// The single value `path` reaches, or `None`
///
/// # Errors
///
/// Returns `PathError::Navigation` if more than one value is reached.
pub fn select_one(path: &Path, structure: &Value) -> PathResult<Option<Value>> {
    let mut values = select(path, structure)?;
    match values.len() {
        0 => Ok(None),
        1 => Ok(values.pop()),
        n => Err(navigation(
            "select_one",
            format!("expected at most one value, found {n}"),
        )),
    }
}

/// Exactly one value
///
/// # Errors
///
/// Returns `PathError::Navigation` unless exactly one value is reached.
pub fn select_one_strict(path: &Path, structure: &Value) -> PathResult<Value> {
    select_one(path, structure)?
        .ok_or_else(|| navigation("select_one_strict", "expected exactly one value, found 0"))
}

/// The first value `path` reaches, if any
///
/// # Errors
///
/// Same as [`select`].
pub fn select_first(path: &Path, structure: &Value) -> PathResult<Option<Value>> {
    Ok(select(path, structure)?.into_iter().next())
}

/// True if `path` reaches anything
///
/// # Errors
///
/// Same as [`select`].
pub fn selected_any(path: &Path, structure: &Value) -> PathResult<bool> {
    Ok(!select(path, structure)?.is_empty())
}

/// Every reached value with the values collected on the way to it
///
/// # Errors
///
/// Same as [`select`].
pub fn select_with_collected(path: &Path, structure: &Value) -> PathResult<Vec<Selection>> {
    path.compiled()?.select_with_collected(structure)
}

/// `structure` with `update` applied at every location `path` reaches
///
/// # Errors
///
/// Compilation errors, `ArityMismatch` when the update's arity disagrees with
/// the collected values, and any navigation error.
pub fn transform(path: &Path, update: &UpdateFn, structure: Value) -> PathResult<Value> {
    path.compiled()?.transform(update, structure)
}

/// `structure` with every location `path` reaches replaced by `value`
///
/// # Errors
///
/// Same as [`transform`].
pub fn setval(path: &Path, value: Value, structure: Value) -> PathResult<Value> {
    path.compiled()?.setval(value, structure)
}

/// Compile `path` without running it
///
/// # Errors
///
/// Returns `PathError::MalformedPath` for structurally invalid paths.
pub fn compile_path(path: &Path) -> PathResult<CompiledPath> {
    path.compile()
}

/// # Errors
///
/// Same as [`CompiledPath::select`].
pub fn compiled_select(compiled: &CompiledPath, structure: &Value) -> PathResult<Vec<Value>> {
    compiled.select(structure)
}

/// # Errors
///
/// Same as [`CompiledPath::transform`].
pub fn compiled_transform(
    compiled: &CompiledPath,
    update: &UpdateFn,
    structure: Value,
) -> PathResult<Value> {
    compiled.transform(update, structure)
}

/// # Errors
///
/// Same as [`CompiledPath::setval`].
pub fn compiled_setval(compiled: &CompiledPath, value: Value, structure: Value) -> PathResult<Value> {
    compiled.setval(value, structure)
}

/// # Errors
///
/// Same as [`CompiledPath::bind`].
pub fn bind_parameters(compiled: &CompiledPath, args: &[Value]) -> PathResult<CompiledPath> {
    compiled.bind(args)
}

/// Declare a recursive path to be provided later
#[must_use]
pub fn declare_recursive_path(name: impl Into<String>) -> RecursivePath {
    RecursivePath::declare(name)
}

/// # Errors
///
/// Same as [`RecursivePath::provide`].
pub fn provide(cell: &RecursivePath, definition: Path) -> PathResult<()> {
    cell.provide(definition)
}

/// Declare a protocol path with default options
#[must_use]
pub fn declare_protocol_path(name: impl Into<String>) -> ProtocolPath {
    ProtocolPath::declare(name)
}

/// # Errors
///
/// Same as [`ProtocolPath::register`].
pub fn register_dispatch(
    protocol: &ProtocolPath,
    tag: impl Into<TypeTag>,
    path: Path,
) -> PathResult<()> {
    protocol.register(tag, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathError;
    use crate::navigators::{all, keypath, must};
    use serde_json::json;

    #[test]
    fn test_select_one_variants() {
        let data = json!({"a": [1, 2], "b": 3});
        assert_eq!(select_one(&keypath("b"), &data).expect("one"), Some(json!(3)));
        assert_eq!(select_one(&must("c"), &data).expect("none"), None);
        assert!(matches!(
            select_one(&keypath("a").then(all()), &data),
            Err(PathError::Navigation { .. })
        ));
        assert!(select_one_strict(&must("c"), &data).is_err());
        assert_eq!(select_one_strict(&must("b"), &data).expect("strict"), json!(3));
    }

    #[test]
    fn test_select_first_and_selected_any() {
        let data = json!([4, 5]);
        assert_eq!(select_first(&all(), &data).expect("first"), Some(json!(4)));
        assert!(selected_any(&all(), &data).expect("any"));
        assert!(!selected_any(&all(), &json!([])).expect("none"));
    }

    #[test]
    fn test_transform_leaves_input_clone_untouched() {
        let original = json!({"a": {"b": 1}, "c": [1, 2]});
        let updated = setval(&keypath("a").then(keypath("b")), json!(2), original.clone())
            .expect("setval");
        assert_eq!(original, json!({"a": {"b": 1}, "c": [1, 2]}));
        assert_eq!(updated, json!({"a": {"b": 2}, "c": [1, 2]}));
    }

    #[test]
    fn test_compiled_entry_points_match_path_entry_points() {
        let path = keypath("xs").then(all());
        let compiled = compile_path(&path).expect("compiles");
        let data = json!({"xs": [1, 2]});
        assert_eq!(
            compiled_select(&compiled, &data).expect("compiled"),
            select(&path, &data).expect("direct")
        );
        assert_eq!(
            compiled_setval(&compiled, json!(0), data.clone()).expect("compiled"),
            setval(&path, json!(0), data).expect("direct")
        );
    }
}
