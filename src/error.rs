// In: src/error.rs

//! This module defines the single, unified error type for the entire antijoin library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

use crate::config::{JoinVariant, NullValuePolicy};
use crate::types::JoinSide;

#[derive(Error, Debug)]
pub enum AntijoinError {
    // =========================================================================
    // === Semantic Errors (Specific to the join itself)
    // =========================================================================
    /// An input sequence held a missing element. This is a caller contract
    /// violation and is distinct from an element whose derived key is absent.
    #[error("null object on the {side} side of the join (position {position})")]
    InvalidInput { side: JoinSide, position: usize },

    #[error("null value policy {policy} is not supported by the {variant} join variant")]
    UnsupportedPolicy {
        policy: NullValuePolicy,
        variant: JoinVariant,
    },

    #[error("Invalid antijoin configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // === Arrow Bridge Errors
    // =========================================================================
    #[error("Unsupported key type for this operation: {0}")]
    UnsupportedType(String),

    #[error("Key type mismatch: left keys are {left}, right keys are {right}")]
    KeyTypeMismatch {
        left: arrow_schema::DataType,
        right: arrow_schema::DataType,
    },

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the Arrow library.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An error from the Serde JSON library, typically while reading a config.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AntijoinError {
    /// Returns `true` for the missing-element contract violation.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AntijoinError::InvalidInput { .. })
    }
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

#[cfg(feature = "python")]
impl From<AntijoinError> for pyo3::PyErr {
    fn from(err: AntijoinError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
