//! # Navpath Engine
//!
//! Path compiler and navigator engine for querying and rebuilding deeply
//! nested immutable data. A path is a composable value describing how to reach
//! a set of locations inside a `serde_json::Value`. The same path can select
//! every value at those locations or produce a new structure with each of
//! them transformed.
//!
//! ## Features
//!
//! - **Continuation-passing navigators**: select and transform share one contract
//! - **Fused compilation**: a whole path runs as a single traversal
//! - **Late-bound parameters**: compile once, bind arguments per call
//! - **Collected values**: thread context captured along the path into updates
//! - **Recursive and protocol paths**: forward declaration and type dispatch
//!
//! ## Usage
//!
//! ```rust
//! use navpath_engine::prelude::*;
//! use serde_json::json;
//!
//! let path = Path::new().key("a").all().filter(|v| v.as_i64().is_some_and(|n| n % 2 == 1));
//! let data = json!({"a": [1, 2, 3]});
//! assert_eq!(select(&path, &data)?, vec![json!(1), json!(3)]);
//! # Ok::<(), navpath_engine::PathError>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod binder;
pub mod combinators;
pub mod compiler;
pub mod config;
pub mod error;
pub mod navigator;
pub mod navigators;
pub mod operations;
pub mod path;
pub mod prelude;
pub mod protocol;
pub mod recursive;
pub mod telemetry;

pub use binder::{LateBound, ParamSlot};
pub use compiler::{CompiledPath, Selection};
pub use config::{DispatchPolicy, EngineConfig, init_global_config};
pub use error::{ErrorPhase, PathError, PathResult};
pub use navigator::{Context, NavRef, Navigator, UpdateFn};
pub use path::{Branch, Path, PathElem};
pub use protocol::{ProtocolOptions, ProtocolPath, TypeTag, TypeTagger};
pub use recursive::RecursivePath;
