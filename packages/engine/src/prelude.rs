//! Navpath Prelude
//!
//! The types and functions needed to build and run paths.

pub use crate::combinators::{
    Branch, capture_current, collect_many, collect_one, comp_paths, cond_path, if_path,
    inject_constant, multi_path, not_selected, selected, subselect, transformed,
};
pub use crate::compiler::{CompiledPath, Selection};
pub use crate::error::{PathError, PathResult};
pub use crate::navigator::UpdateFn;
pub use crate::navigators::{
    Key, all, first, keypath, last, late, map_keys, map_vals, must, nth, pred, srange, stay,
    stop, view, walker,
};
pub use crate::operations::{
    bind_parameters, compile_path, compiled_select, compiled_setval, compiled_transform,
    declare_protocol_path, declare_recursive_path, provide, register_dispatch, select,
    select_first, select_one, select_one_strict, select_with_collected, selected_any, setval,
    transform,
};
pub use crate::path::Path;
pub use crate::protocol::{ProtocolOptions, ProtocolPath, TypeTag, TypeTagger};
pub use crate::recursive::RecursivePath;
