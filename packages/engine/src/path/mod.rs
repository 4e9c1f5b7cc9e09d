//! Path representation
//!
//! A [`Path`] is pure data: an ordered list of navigation steps, combinators
//! and late-bound placeholders. Nothing is traversed until the path is
//! compiled and run. Left-to-right order is outer-to-inner traversal order.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::binder::LateBound;
use crate::compiler::{self, CompiledPath};
use crate::config::EngineConfig;
use crate::error::{PathResult, malformed};
use crate::navigator::{NavRef, Navigator, UpdateFn};
use crate::protocol::ProtocolPath;
use crate::recursive::RecursivePath;
use crate::telemetry::global_stats;

mod builder;

/// One element of a path
#[derive(Clone, Debug)]
pub enum PathElem {
    /// A concrete navigator
    Nav(NavRef),
    /// A placeholder resolved when parameters are bound
    Late(LateBound),
    /// Append the focused value to the collected values
    CaptureCurrent,
    /// Append the single value a sub-path selects
    CollectOne(Path),
    /// Append every value a sub-path selects, as an array
    CollectMany(Path),
    /// Append a constant fixed at construction time
    Inject(Value),
    /// Follow `then` if `cond` selects anything, `otherwise` if not
    IfPath {
        cond: Path,
        then: Path,
        otherwise: Option<Path>,
    },
    /// Follow every branch whose guard matches
    MultiPath(Vec<Branch>),
    /// Follow the first branch whose guard matches
    CondPath(Vec<(Path, Path)>),
    /// Stay at the focus only if the sub-path selects something (or nothing, when negated)
    Selected { path: Path, negate: bool },
    /// Navigate to the array of everything the sub-path selects
    Subselect(Path),
    /// Navigate to the focus as transformed through the sub-path
    Transformed { path: Path, update: UpdateFn },
    /// Reference to a forward-declared recursive path
    Recursive(RecursivePath),
    /// Dispatch on the focused value's runtime type
    Protocol(ProtocolPath),
}

/// A branch of a multi-path
#[derive(Clone, Debug)]
pub struct Branch {
    pub(crate) guard: Option<Path>,
    pub(crate) path: Path,
}

impl Branch {
    /// A branch that always applies
    #[must_use]
    pub fn always(path: Path) -> Self {
        Self { guard: None, path }
    }

    /// A branch that applies when `guard` selects anything from the focus
    #[must_use]
    pub fn when(guard: Path, path: Path) -> Self {
        Self {
            guard: Some(guard),
            path,
        }
    }
}

/// An ordered sequence of navigation steps
#[derive(Clone, Default)]
pub struct Path {
    elems: Vec<PathElem>,
    compiled: OnceLock<CompiledPath>,
}

impl Path {
    /// The empty path; selects the structure itself
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A path of one element
    #[must_use]
    pub fn from_elem(elem: PathElem) -> Self {
        Self {
            elems: vec![elem],
            compiled: OnceLock::new(),
        }
    }

    /// A path of one navigator
    #[must_use]
    pub fn from_navigator<N: Navigator + 'static>(nav: N) -> Self {
        Self::from_elem(PathElem::Nav(Arc::new(nav)))
    }

    /// A path of one shared navigator
    #[must_use]
    pub fn from_nav_ref(nav: NavRef) -> Self {
        Self::from_elem(PathElem::Nav(nav))
    }

    /// Elements in traversal order
    #[must_use]
    pub fn elems(&self) -> &[PathElem] {
        &self.elems
    }

    /// Number of top-level elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// True for the empty path
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Sequential composition: `self` followed by `next`
    #[must_use]
    pub fn then(mut self, next: Path) -> Self {
        self.elems.extend(next.elems);
        self.compiled = OnceLock::new();
        self
    }

    /// Append a single element
    #[must_use]
    pub fn push(mut self, elem: PathElem) -> Self {
        self.elems.push(elem);
        self.compiled = OnceLock::new();
        self
    }

    /// Total number of late-bound parameters, in binding order
    #[must_use]
    pub fn param_arity(&self) -> usize {
        self.elems.iter().map(PathElem::param_arity).sum()
    }

    /// Check the path's structure without compiling it
    ///
    /// # Errors
    ///
    /// Returns `PathError::MalformedPath` for branch combinators without branches.
    pub fn validate(&self) -> PathResult<()> {
        self.elems.iter().try_for_each(PathElem::validate)
    }

    /// Compile this path into a fused, reusable form
    ///
    /// # Errors
    ///
    /// Returns `PathError::MalformedPath` for structurally invalid paths.
    pub fn compile(&self) -> PathResult<CompiledPath> {
        compiler::compile(self)
    }

    /// The compiled form of this path, memoized when caching is enabled
    ///
    /// # Errors
    ///
    /// Same as [`Path::compile`].
    pub fn compiled(&self) -> PathResult<Cow<'_, CompiledPath>> {
        if !EngineConfig::global().cache_compiled_paths {
            return self.compile().map(Cow::Owned);
        }
        if let Some(compiled) = self.compiled.get() {
            global_stats().record_cache_hit();
            return Ok(Cow::Borrowed(compiled));
        }
        let compiled = self.compile()?;
        Ok(Cow::Borrowed(self.compiled.get_or_init(|| compiled)))
    }
}

impl PathElem {
    fn param_arity(&self) -> usize {
        match self {
            PathElem::Late(late) => late.arity(),
            PathElem::CollectOne(path)
            | PathElem::CollectMany(path)
            | PathElem::Subselect(path)
            | PathElem::Selected { path, .. }
            | PathElem::Transformed { path, .. } => path.param_arity(),
            PathElem::IfPath {
                cond,
                then,
                otherwise,
            } => {
                cond.param_arity()
                    + then.param_arity()
                    + otherwise.as_ref().map_or(0, Path::param_arity)
            }
            PathElem::MultiPath(branches) => branches
                .iter()
                .map(|branch| {
                    branch.guard.as_ref().map_or(0, Path::param_arity) + branch.path.param_arity()
                })
                .sum(),
            PathElem::CondPath(pairs) => pairs
                .iter()
                .map(|(guard, path)| guard.param_arity() + path.param_arity())
                .sum(),
            PathElem::Nav(_)
            | PathElem::CaptureCurrent
            | PathElem::Inject(_)
            | PathElem::Recursive(_)
            | PathElem::Protocol(_) => 0,
        }
    }

    fn validate(&self) -> PathResult<()> {
        match self {
            PathElem::CollectOne(path)
            | PathElem::CollectMany(path)
            | PathElem::Subselect(path)
            | PathElem::Selected { path, .. }
            | PathElem::Transformed { path, .. } => path.validate(),
            PathElem::IfPath {
                cond,
                then,
                otherwise,
            } => {
                cond.validate()?;
                then.validate()?;
                otherwise.as_ref().map_or(Ok(()), Path::validate)
            }
            PathElem::MultiPath(branches) => {
                if branches.is_empty() {
                    return Err(malformed("multi_path requires at least one branch"));
                }
                for branch in branches {
                    if let Some(guard) = &branch.guard {
                        guard.validate()?;
                    }
                    branch.path.validate()?;
                }
                Ok(())
            }
            PathElem::CondPath(pairs) => {
                if pairs.is_empty() {
                    return Err(malformed("cond_path requires at least one branch"));
                }
                for (guard, path) in pairs {
                    guard.validate()?;
                    path.validate()?;
                }
                Ok(())
            }
            PathElem::Nav(_)
            | PathElem::Late(_)
            | PathElem::CaptureCurrent
            | PathElem::Inject(_)
            | PathElem::Recursive(_)
            | PathElem::Protocol(_) => Ok(()),
        }
    }
}

impl FromIterator<Path> for Path {
    fn from_iter<I: IntoIterator<Item = Path>>(iter: I) -> Self {
        iter.into_iter().fold(Path::new(), Path::then)
    }
}

impl From<PathElem> for Path {
    fn from(elem: PathElem) -> Self {
        Path::from_elem(elem)
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.elems).finish()
    }
}
