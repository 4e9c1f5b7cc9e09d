//! Forward-declared recursive paths
//!
//! A [`RecursivePath`] is a named cell that can be referenced inside paths
//! before its definition exists, including inside its own definition. The
//! definition is provided exactly once. It is compiled lazily on first
//! traversal and the compiled navigator is shared by every reference.

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::error::{PathResult, double_provision, malformed, unprovided};
use crate::navigator::{Context, NavRef, Navigator, SelectFn, TransformFn};
use crate::path::{Path, PathElem};

struct Cell {
    name: String,
    definition: OnceLock<Path>,
    compiled: OnceLock<NavRef>,
}

/// Handle to a forward-declared recursive path
///
/// Clones share the same cell.
#[derive(Clone)]
pub struct RecursivePath {
    inner: Arc<Cell>,
}

impl RecursivePath {
    /// Declare an empty recursive path
    #[must_use]
    pub fn declare(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Cell {
                name: name.into(),
                definition: OnceLock::new(),
                compiled: OnceLock::new(),
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// True once a definition has been provided
    #[must_use]
    pub fn is_provided(&self) -> bool {
        self.inner.definition.get().is_some()
    }

    /// Provide the definition
    ///
    /// # Errors
    ///
    /// Returns `PathError::DoubleProvision` if a definition already exists,
    /// or `PathError::MalformedPath` if `definition` is structurally invalid
    /// or contains late-bound placeholders.
    pub fn provide(&self, definition: Path) -> PathResult<()> {
        if definition.param_arity() > 0 {
            return Err(malformed(format!(
                "recursive path '{}' cannot contain late-bound parameters",
                self.name()
            )));
        }
        definition.validate()?;
        self.inner
            .definition
            .set(definition)
            .map_err(|_| double_provision(self.name()))?;
        log::debug!("Provided recursive path '{}'", self.name());
        Ok(())
    }

    /// A one-element path referencing this cell
    #[must_use]
    pub fn path(&self) -> Path {
        Path::from_elem(PathElem::Recursive(self.clone()))
    }

    pub(crate) fn navigator(&self) -> NavRef {
        Arc::new(RecursiveRef {
            cell: Arc::clone(&self.inner),
        })
    }
}

impl Cell {
    fn resolve(&self) -> PathResult<NavRef> {
        if let Some(nav) = self.compiled.get() {
            return Ok(Arc::clone(nav));
        }
        let definition = self
            .definition
            .get()
            .ok_or_else(|| unprovided(self.name.as_str()))?;
        let compiled = definition.compile()?;
        let nav = Arc::clone(compiled.navigator()?);
        tracing::debug!(
            target: "navpath::recursive",
            name = %self.name,
            "compiled recursive path"
        );
        Ok(Arc::clone(self.compiled.get_or_init(|| nav)))
    }
}

impl fmt::Debug for RecursivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecursivePath")
            .field("name", &self.inner.name)
            .field("provided", &self.is_provided())
            .finish()
    }
}

/// Navigator placed wherever a recursive path is referenced
struct RecursiveRef {
    cell: Arc<Cell>,
}

impl fmt::Debug for RecursiveRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecursiveRef({})", self.cell.name)
    }
}

impl Navigator for RecursiveRef {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        let nav = self.cell.resolve()?;
        cx.descend(&self.cell.name, |cx| nav.select_step(cx, focus, next))
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        let nav = self.cell.resolve()?;
        cx.descend(&self.cell.name, |cx| nav.transform_step(cx, focus, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::if_path;
    use crate::config::ConfigDefaults;
    use crate::error::PathError;
    use crate::navigator::UpdateFn;
    use crate::navigators::{all, late, pred, stay};
    use crate::operations::{select, transform};
    use serde_json::json;

    fn leaves() -> RecursivePath {
        let cell = RecursivePath::declare("leaves");
        cell.provide(if_path(
            pred(Value::is_array),
            all().then(cell.path()),
            Some(stay()),
        ))
        .expect("provides");
        cell
    }

    #[test]
    fn test_recursive_path_walks_nested_arrays() {
        let data = json!([1, [2, [3, 4]], 5]);
        assert_eq!(
            select(&leaves().path(), &data).expect("select"),
            vec![json!(1), json!(2), json!(3), json!(4), json!(5)]
        );
        let doubled = transform(
            &leaves().path(),
            &UpdateFn::unary(|v| json!(v.as_i64().unwrap_or(0) * 2)),
            data,
        )
        .expect("transform");
        assert_eq!(doubled, json!([2, [4, [6, 8]], 10]));
    }

    #[test]
    fn test_unprovided_fails_at_run_time() {
        let cell = RecursivePath::declare("later");
        let path = all().then(cell.path());
        let compiled = path.compile().expect("compiles before provision");
        let err = compiled.select(&json!([1])).expect_err("not provided");
        assert_eq!(
            err,
            PathError::UnprovidedRecursivePath {
                name: "later".into()
            }
        );
        assert!(compiled.select(&json!([])).expect("no reference reached").is_empty());

        cell.provide(stay()).expect("provides");
        assert_eq!(compiled.select(&json!([1])).expect("select"), vec![json!(1)]);
    }

    #[test]
    fn test_provide_twice_fails() {
        let cell = RecursivePath::declare("once");
        cell.provide(stay()).expect("first");
        let err = cell.provide(stay()).expect_err("second");
        assert!(matches!(err, PathError::DoubleProvision { .. }));
    }

    #[test]
    fn test_parameterized_definition_is_malformed() {
        let cell = RecursivePath::declare("late");
        let err = cell.provide(late::keypath()).expect_err("late-bound");
        assert!(matches!(err, PathError::MalformedPath(_)));
        assert!(!cell.is_provided());
    }

    #[test]
    fn test_infinite_recursion_hits_limit() {
        let cell = RecursivePath::declare("forever");
        cell.provide(cell.path()).expect("provides");
        let compiled = cell.path().compile().expect("compiles").with_recursion_limit(16);
        let err = compiled.select(&json!(1)).expect_err("runaway");
        assert_eq!(
            err,
            PathError::RecursionLimit {
                name: "forever".into(),
                limit: 16
            }
        );
    }

    #[test]
    fn test_clamped_limit_stops_before_the_stack() {
        let handle = std::thread::Builder::new()
            .stack_size(8 << 20)
            .spawn(|| {
                let cell = RecursivePath::declare("runaway");
                cell.provide(cell.path()).expect("provides");
                let compiled = cell
                    .path()
                    .compile()
                    .expect("compiles")
                    .with_recursion_limit(usize::MAX);
                compiled.select(&json!(1))
            })
            .expect("spawn");
        let err = handle.join().expect("no overflow").expect_err("runaway");
        assert_eq!(
            err,
            PathError::RecursionLimit {
                name: "runaway".into(),
                limit: ConfigDefaults::MAX_RECURSION_DEPTH
            }
        );
    }
}
