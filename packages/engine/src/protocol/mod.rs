//! Protocol paths
//!
//! A [`ProtocolPath`] is a named path whose behavior depends on the runtime
//! type of the focused value. Dispatch entries are registered after
//! declaration, and the path can be referenced in other paths (or in its own
//! entries) before any entry exists. Entries are read at traversal time, so a
//! registration is visible to every path already compiled against it.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use hashbrown::HashMap;
use serde_json::Value;

use crate::config::{DispatchPolicy, EngineConfig};
use crate::error::{PathResult, duplicate_dispatch, malformed, unmatched_dispatch};
use crate::navigator::{Context, NavRef, Navigator, SelectFn, TransformFn};
use crate::path::{Path, PathElem};

mod tag;

pub use tag::{TypeTag, TypeTagger, kind_of};

const DEFAULT_ENTRY: &str = "*";

/// Per-protocol dispatch options
#[derive(Debug, Clone)]
pub struct ProtocolOptions {
    pub tagger: TypeTagger,
    pub policy: DispatchPolicy,
}

impl Default for ProtocolOptions {
    /// Tag by the configured type field; unmatched policy from the global config
    fn default() -> Self {
        let config = EngineConfig::global();
        Self {
            tagger: TypeTagger::Field(config.type_tag_field.clone()),
            policy: config.unmatched_dispatch,
        }
    }
}

struct Protocol {
    name: String,
    options: ProtocolOptions,
    entries: RwLock<HashMap<TypeTag, NavRef>>,
    fallback: RwLock<Option<NavRef>>,
}

/// Handle to a type-dispatched path
///
/// Clones share the same dispatch table.
#[derive(Clone)]
pub struct ProtocolPath {
    inner: Arc<Protocol>,
}

impl ProtocolPath {
    /// Declare a protocol path with default options
    #[must_use]
    pub fn declare(name: impl Into<String>) -> Self {
        Self::declare_with(name, ProtocolOptions::default())
    }

    /// Declare a protocol path with explicit options
    #[must_use]
    pub fn declare_with(name: impl Into<String>, options: ProtocolOptions) -> Self {
        Self {
            inner: Arc::new(Protocol {
                name: name.into(),
                options,
                entries: RwLock::new(HashMap::new()),
                fallback: RwLock::new(None),
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[must_use]
    pub fn policy(&self) -> DispatchPolicy {
        self.inner.options.policy
    }

    /// Registered type tags, sorted
    #[must_use]
    pub fn tags(&self) -> Vec<TypeTag> {
        let entries = self
            .inner
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut tags: Vec<TypeTag> = entries.keys().cloned().collect();
        tags.sort();
        tags
    }

    /// Register the path followed for values tagged `tag`
    ///
    /// # Errors
    ///
    /// Returns `PathError::DuplicateDispatch` if `tag` already has an entry,
    /// or `PathError::MalformedPath` if `path` is invalid or contains
    /// late-bound placeholders.
    pub fn register(&self, tag: impl Into<TypeTag>, path: Path) -> PathResult<()> {
        let tag = tag.into();
        let nav = self.compile_entry(&path)?;
        let mut entries = self
            .inner
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if entries.contains_key(&tag) {
            return Err(duplicate_dispatch(self.name(), tag.as_str()));
        }
        log::debug!("Registered dispatch '{}' on protocol path '{}'", tag, self.name());
        entries.insert(tag, nav);
        Ok(())
    }

    /// Register the path followed for values with no specific entry
    ///
    /// # Errors
    ///
    /// Same as [`ProtocolPath::register`].
    pub fn register_default(&self, path: Path) -> PathResult<()> {
        let nav = self.compile_entry(&path)?;
        let mut fallback = self
            .inner
            .fallback
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if fallback.is_some() {
            return Err(duplicate_dispatch(self.name(), DEFAULT_ENTRY));
        }
        log::debug!("Registered default dispatch on protocol path '{}'", self.name());
        *fallback = Some(nav);
        Ok(())
    }

    fn compile_entry(&self, path: &Path) -> PathResult<NavRef> {
        if path.param_arity() > 0 {
            return Err(malformed(format!(
                "protocol path '{}' entries cannot contain late-bound parameters",
                self.name()
            )));
        }
        let compiled = path.compile()?;
        compiled.navigator().map(Arc::clone)
    }

    /// A one-element path dispatching through this protocol
    #[must_use]
    pub fn path(&self) -> Path {
        Path::from_elem(PathElem::Protocol(self.clone()))
    }

    pub(crate) fn navigator(&self) -> NavRef {
        Arc::new(ProtocolRef {
            protocol: Arc::clone(&self.inner),
        })
    }
}

impl Protocol {
    /// The entry for `focus`, or `None` when the policy allows no match
    fn lookup(&self, focus: &Value) -> PathResult<Option<NavRef>> {
        let tag = self.options.tagger.tag_of(focus);
        let found = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&tag)
            .cloned();
        let found = match found {
            Some(nav) => Some(nav),
            None => self
                .fallback
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        };
        match (found, self.options.policy) {
            (Some(nav), _) => Ok(Some(nav)),
            (None, DispatchPolicy::NoMatch) => Ok(None),
            (None, DispatchPolicy::FailFast) => {
                tracing::debug!(
                    target: "navpath::protocol",
                    name = %self.name,
                    tag = %tag,
                    "no dispatch entry"
                );
                Err(unmatched_dispatch(self.name.as_str(), tag.as_str()))
            }
        }
    }
}

impl fmt::Debug for ProtocolPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolPath")
            .field("name", &self.inner.name)
            .field("tags", &self.tags())
            .field("policy", &self.inner.options.policy)
            .finish()
    }
}

struct ProtocolRef {
    protocol: Arc<Protocol>,
}

impl fmt::Debug for ProtocolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProtocolRef({})", self.protocol.name)
    }
}

impl Navigator for ProtocolRef {
    fn select_step(
        &self,
        cx: &mut Context,
        focus: &Value,
        next: &mut SelectFn<'_>,
    ) -> PathResult<()> {
        match self.protocol.lookup(focus)? {
            Some(nav) => cx.descend(&self.protocol.name, |cx| nav.select_step(cx, focus, next)),
            None => Ok(()),
        }
    }

    fn transform_step(
        &self,
        cx: &mut Context,
        focus: Value,
        next: &mut TransformFn<'_>,
    ) -> PathResult<Value> {
        match self.protocol.lookup(&focus)? {
            Some(nav) => cx.descend(&self.protocol.name, |cx| nav.transform_step(cx, focus, next)),
            None => Ok(focus),
        }
    }
}
