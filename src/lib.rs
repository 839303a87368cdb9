//! This file is the root of the `antijoin` Rust crate.
//!
//! The crate computes a key-based antijoin of two collections: the left
//! elements with no right counterpart, the right elements with no left
//! counterpart, and the pairs that share a key. Elements whose derived key is
//! absent are kept or dropped according to a `NullValuePolicy`.
//!
//! ```
//! use antijoin::antijoin;
//!
//! let result = antijoin(vec![1, 2, 3], vec![2, 3, 4]).unwrap();
//! assert_eq!(result.left_complement(), &[1]);
//! assert_eq!(result.joined_pairs().len(), 2);
//! assert_eq!(result.right_complement(), &[4]);
//! ```

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bridge;
pub mod config;
pub mod engine;
pub mod error;
pub mod observability;
pub mod types;

#[cfg(feature = "python")]
mod ffi;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use config::{AntijoinConfig, JoinVariant, NullValuePolicy};
pub use engine::{
    antijoin, antijoin_by, antijoin_set, antijoin_set_slots, antijoin_slots, antijoin_with,
    AntijoinOutput, Antijoiner,
};
pub use error::AntijoinError;
pub use observability::init_logging;
pub use types::{AntijoinResult, AntijoinStats, JoinSide, JoinedPair, SetAntijoinResult};
