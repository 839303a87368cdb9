//! This module defines the Foreign Function Interface (FFI) for the antijoin
//! library. It is only compiled with the `python` feature.

pub mod python;
