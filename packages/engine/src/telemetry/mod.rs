//! Telemetry for path compilation and execution
//!
//! Lock-free counters recorded by every entry point, with a serializable
//! point-in-time snapshot.

pub mod path_stats;

pub use path_stats::{PathStats, PathStatsSnapshot, global_stats};
