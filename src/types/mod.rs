//! This module defines the core, strongly-typed data representations produced
//! by the antijoin engines.
//!
//! It includes the side marker used in errors and logs, the immutable
//! `JoinedPair`, and the two result aggregates (list and set flavours) together
//! with their per-call statistics.

pub mod join_result;

// Re-export the main types for easier access.
pub use join_result::{AntijoinResult, AntijoinStats, JoinSide, JoinedPair, SetAntijoinResult};
