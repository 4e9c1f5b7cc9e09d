//! Path combinators
//!
//! Combinators build paths out of other paths. The collecting combinators
//! push values onto the context's collected stack for the update function,
//! the branch combinators choose among sub-paths based on the focus, and the
//! derived combinators navigate to values computed from sub-paths.

use crate::path::Path;

mod branch;
mod collect;
mod derived;
mod filter;

pub use branch::{CondPath, IfPath, MultiPath, cond_path, if_path, multi_path};
pub use collect::{
    CaptureCurrent, CollectMany, CollectOne, InjectConstant, capture_current, collect_many,
    collect_one, inject_constant,
};
pub use derived::{Subselect, Transformed, subselect, transformed};
pub use filter::{Selected, not_selected, selected};

pub use crate::path::Branch;

/// Sequential composition of any number of paths
#[must_use]
pub fn comp_paths<I>(paths: I) -> Path
where
    I: IntoIterator<Item = Path>,
{
    paths.into_iter().collect()
}
