//! Navpath Prelude
//!
//! Everything needed to build and run paths, plus the `Nav` entry point.

pub use navpath_engine::prelude::*;

pub use crate::Nav;
