// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Arrow Bridge
// ====================================================================================
//
// The `bridge` adapts columnar Arrow data to the generic, Arrow-agnostic engine in
// `engine`. The engine never sees an Arrow type: the bridge hands it row indices as
// elements and reads the key of each row straight out of the key array.
//
// Data Flow:
//
//   1. [Record Batch API (antijoin_record_batches)] -> Receives two `RecordBatch`es
//         |
//         `-> resolves the key columns by name ->
//
//   2. [Array API (antijoin_arrays)]              -> Receives two `&dyn Array` key columns
//         |
//         `-> a. Dispatches on the key `DataType` to a typed key reader
//         |
//         `-> b. Runs `engine::list` over `0..len` row indices; a null key slot is
//                an absent key and is governed by the `NullValuePolicy`
//         |
//         `-> c. Returns `ArrowAntijoinIndices` (UInt64 index arrays)
//
//   3. [Record Batch API]                         -> `take`s the rows for each part
//                                                    and assembles three batches
//
// ====================================================================================

pub mod arrow_impl;

pub use self::arrow_impl::{
    antijoin_arrays, antijoin_record_batches, ArrowAntijoinIndices, RecordBatchAntijoin,
};
