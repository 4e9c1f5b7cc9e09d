//! Path error handling module
//!
//! Error types, phase classification and constructor helpers shared by the
//! compiler, the binder and every navigator.

pub mod constructors;
mod types;

pub use constructors::{
    arity_mismatch, double_provision, duplicate_dispatch, invalid_parameter, malformed,
    navigation, recursion_limit, unmatched_dispatch, unprovided,
};
pub use types::{ErrorPhase, PathError, PathResult};
