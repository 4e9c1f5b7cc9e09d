//! Fluent path construction
//!
//! Shorthand for appending common steps: `Path::new().key("pets").all().key("name")`.

use serde_json::Value;

use super::{Path, PathElem};
use crate::binder::LateBound;
use crate::combinators;
use crate::navigators::{self, Key};
use crate::protocol::ProtocolPath;
use crate::recursive::RecursivePath;

impl Path {
    /// Append `keypath(key)`
    #[must_use]
    pub fn key(self, key: impl Into<Key>) -> Self {
        self.then(navigators::keypath(key))
    }

    /// Append `must(key)`
    #[must_use]
    pub fn must(self, key: impl Into<Key>) -> Self {
        self.then(navigators::must(key))
    }

    /// Append `nth(index)`
    #[must_use]
    pub fn nth(self, index: i64) -> Self {
        self.then(navigators::nth(index))
    }

    /// Append `all()`
    #[must_use]
    pub fn all(self) -> Self {
        self.then(navigators::all())
    }

    /// Append `map_vals()`
    #[must_use]
    pub fn map_vals(self) -> Self {
        self.then(navigators::map_vals())
    }

    /// Append `pred(f)`
    #[must_use]
    pub fn filter<F>(self, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.then(navigators::pred(f))
    }

    /// Append a late-bound placeholder
    #[must_use]
    pub fn late(self, late: LateBound) -> Self {
        self.push(PathElem::Late(late))
    }

    /// Append `capture_current()`
    #[must_use]
    pub fn capture_current(self) -> Self {
        self.then(combinators::capture_current())
    }

    /// Append `collect_one(path)`
    #[must_use]
    pub fn collect_one(self, path: Path) -> Self {
        self.then(combinators::collect_one(path))
    }

    /// Append `collect_many(path)`
    #[must_use]
    pub fn collect_many(self, path: Path) -> Self {
        self.then(combinators::collect_many(path))
    }

    /// Append `inject_constant(value)`
    #[must_use]
    pub fn inject(self, value: Value) -> Self {
        self.then(combinators::inject_constant(value))
    }

    /// Append a reference to a recursive path
    #[must_use]
    pub fn recurse(self, cell: &RecursivePath) -> Self {
        self.then(cell.path())
    }

    /// Append a protocol dispatch step
    #[must_use]
    pub fn dispatch(self, protocol: &ProtocolPath) -> Self {
        self.then(protocol.path())
    }
}
