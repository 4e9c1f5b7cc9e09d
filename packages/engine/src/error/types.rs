//! Path Error Types
//!
//! Core error types for path compilation, parameter binding and traversal.

use std::fmt;

/// Errors raised while building, compiling, binding or running a path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Argument count does not match a declared arity
    #[error("arity mismatch in {context}: expected {expected} argument(s), got {actual}")]
    ArityMismatch {
        /// What was being called or bound
        context: String,
        /// Declared arity
        expected: usize,
        /// Supplied argument count
        actual: usize,
    },

    /// A recursive path was traversed before `provide` was called
    #[error("recursive path '{name}' was used before it was provided")]
    UnprovidedRecursivePath {
        /// Name given at declaration
        name: String,
    },

    /// `provide` was called twice on the same recursive path
    #[error("recursive path '{name}' has already been provided")]
    DoubleProvision {
        /// Name given at declaration
        name: String,
    },

    /// A protocol path met a type with no entry and no default
    #[error("protocol path '{name}' has no dispatch entry for type '{tag}'")]
    UnmatchedDispatch {
        /// Protocol path name
        name: String,
        /// Runtime type tag of the focused value
        tag: String,
    },

    /// A protocol path already has an entry for this type
    #[error("protocol path '{name}' already has a dispatch entry for type '{tag}'")]
    DuplicateDispatch {
        /// Protocol path name
        name: String,
        /// Type tag registered twice
        tag: String,
    },

    /// Structurally invalid path construction
    #[error("malformed path: {0}")]
    MalformedPath(String),

    /// A late-bound argument could not be turned into a navigator
    #[error("invalid parameter for '{navigator}': {message}")]
    InvalidParameter {
        /// Navigator receiving the argument
        navigator: String,
        /// What was wrong with it
        message: String,
    },

    /// A navigator could not apply itself to the focused value
    #[error("navigator '{navigator}' failed: {message}")]
    Navigation {
        /// Navigator that failed
        navigator: String,
        /// Failure details
        message: String,
    },

    /// Recursive or protocol re-entry exceeded the configured depth
    #[error("recursion depth limit of {limit} exceeded while entering '{name}'")]
    RecursionLimit {
        /// Recursive or protocol path being entered
        name: String,
        /// Configured maximum depth
        limit: usize,
    },
}

/// When an error can be raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorPhase {
    /// Path construction, compilation or setup; caught by the path author
    Compile,
    /// Invocation against concrete data or arguments
    Run,
}

impl PathError {
    /// Classify this error as a compile-time or run-time failure
    #[must_use]
    pub fn phase(&self) -> ErrorPhase {
        match self {
            PathError::MalformedPath(_)
            | PathError::DoubleProvision { .. }
            | PathError::DuplicateDispatch { .. } => ErrorPhase::Compile,
            PathError::ArityMismatch { .. }
            | PathError::UnprovidedRecursivePath { .. }
            | PathError::UnmatchedDispatch { .. }
            | PathError::InvalidParameter { .. }
            | PathError::Navigation { .. }
            | PathError::RecursionLimit { .. } => ErrorPhase::Run,
        }
    }

    /// Returns true if the error should have been caught while building the path
    #[must_use]
    pub fn is_compile_time(&self) -> bool {
        self.phase() == ErrorPhase::Compile
    }

    /// Returns true if the error is an arity mismatch
    #[must_use]
    pub fn is_arity_mismatch(&self) -> bool {
        matches!(self, PathError::ArityMismatch { .. })
    }
}

impl fmt::Display for ErrorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPhase::Compile => f.write_str("compile"),
            ErrorPhase::Run => f.write_str("run"),
        }
    }
}

/// Result type for path operations
pub type PathResult<T> = Result<T, PathError>;
