//! Arrow adapters for the list-semantics engine.

use std::hash::Hash;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, UInt64Array};
use arrow::compute::{take, take_record_batch};
use arrow::datatypes::{
    ArrowPrimitiveType, Date32Type, Date64Type, Int16Type, Int32Type, Int64Type, Int8Type,
    UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use arrow_schema::{DataType, Field, Schema};
use hashbrown::HashSet;

use crate::config::NullValuePolicy;
use crate::engine::antijoin_with;
use crate::error::AntijoinError;
use crate::types::AntijoinStats;

/// Prefix given to right-side fields whose name collides with a left-side field
/// in the joined batch.
pub const RIGHT_COLLISION_PREFIX: &str = "right.";

//==================================================================================
// 1. Output Types
//==================================================================================

/// Row indices describing the three-way partition of two key columns.
///
/// `joined_left[i]` and `joined_right[i]` form the i-th joined pair.
#[derive(Debug, Clone)]
pub struct ArrowAntijoinIndices {
    pub left_complement: UInt64Array,
    pub joined_left: UInt64Array,
    pub joined_right: UInt64Array,
    pub right_complement: UInt64Array,
    pub stats: AntijoinStats,
}

/// The three-way partition of two record batches.
#[derive(Debug, Clone)]
pub struct RecordBatchAntijoin {
    /// Unmatched left rows, with the left schema.
    pub left_complement: RecordBatch,
    /// Matched rows: all left columns followed by all right columns.
    pub joined: RecordBatch,
    /// Unmatched right rows, with the right schema.
    pub right_complement: RecordBatch,
    pub stats: AntijoinStats,
}

//==================================================================================
// 2. Private Core Logic
//==================================================================================

fn to_index_array(rows: impl IntoIterator<Item = usize>) -> UInt64Array {
    UInt64Array::from_iter_values(rows.into_iter().map(|row| row as u64))
}

/// Runs the engine with row indices as elements. `left_key_at`/`right_key_at`
/// return the key of a row, or `None` for a null slot.
fn join_rows<X, FL, FR>(
    left_len: usize,
    right_len: usize,
    left_key_at: FL,
    right_key_at: FR,
    null_policy: NullValuePolicy,
) -> Result<ArrowAntijoinIndices, AntijoinError>
where
    X: Eq + Hash,
    FL: Fn(usize) -> Option<X>,
    FR: Fn(usize) -> Option<X>,
{
    let result = antijoin_with(
        0..left_len,
        0..right_len,
        |&row: &usize| left_key_at(row),
        |&row: &usize| right_key_at(row),
        null_policy,
    )?;
    let stats = *result.stats();
    let (left_complement, joined_pairs, right_complement) = result.into_parts();

    let (joined_left, joined_right): (Vec<usize>, Vec<usize>) =
        joined_pairs.into_iter().map(|pair| pair.into_parts()).unzip();

    Ok(ArrowAntijoinIndices {
        left_complement: to_index_array(left_complement),
        joined_left: to_index_array(joined_left),
        joined_right: to_index_array(joined_right),
        right_complement: to_index_array(right_complement),
        stats,
    })
}

fn join_primitive<T>(
    left_keys: &dyn Array,
    right_keys: &dyn Array,
    null_policy: NullValuePolicy,
) -> Result<ArrowAntijoinIndices, AntijoinError>
where
    T: ArrowPrimitiveType,
    T::Native: Eq + Hash,
{
    let left = left_keys.as_primitive::<T>();
    let right = right_keys.as_primitive::<T>();
    join_rows(
        left.len(),
        right.len(),
        |row| left.is_valid(row).then(|| left.value(row)),
        |row| right.is_valid(row).then(|| right.value(row)),
        null_policy,
    )
}

fn join_boolean(
    left_keys: &dyn Array,
    right_keys: &dyn Array,
    null_policy: NullValuePolicy,
) -> Result<ArrowAntijoinIndices, AntijoinError> {
    let left = left_keys.as_boolean();
    let right = right_keys.as_boolean();
    join_rows(
        left.len(),
        right.len(),
        |row| left.is_valid(row).then(|| left.value(row)),
        |row| right.is_valid(row).then(|| right.value(row)),
        null_policy,
    )
}

fn join_utf8<O: arrow::array::OffsetSizeTrait>(
    left_keys: &dyn Array,
    right_keys: &dyn Array,
    null_policy: NullValuePolicy,
) -> Result<ArrowAntijoinIndices, AntijoinError> {
    let left = left_keys.as_string::<O>();
    let right = right_keys.as_string::<O>();
    join_rows(
        left.len(),
        right.len(),
        |row| left.is_valid(row).then(|| left.value(row)),
        |row| right.is_valid(row).then(|| right.value(row)),
        null_policy,
    )
}

/// Builds the joined batch: left columns then right columns, taken at the
/// joined row indices.
///
/// Every field name in the joined schema is unique. A right field whose name is
/// already taken is prefixed with [`RIGHT_COLLISION_PREFIX`] until it is not.
fn build_joined_batch(
    left: &RecordBatch,
    right: &RecordBatch,
    joined_left: &UInt64Array,
    joined_right: &UInt64Array,
) -> Result<RecordBatch, AntijoinError> {
    let left_schema = left.schema();
    let right_schema = right.schema();
    let mut taken_names: HashSet<String> = left_schema
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();

    let mut fields: Vec<Field> = Vec::with_capacity(left.num_columns() + right.num_columns());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(fields.capacity());

    for (field, column) in left_schema.fields().iter().zip(left.columns()) {
        fields.push(field.as_ref().clone());
        columns.push(take(column.as_ref(), joined_left, None)?);
    }
    for (field, column) in right_schema.fields().iter().zip(right.columns()) {
        let mut name = field.name().clone();
        while taken_names.contains(&name) {
            name = format!("{}{}", RIGHT_COLLISION_PREFIX, name);
        }
        taken_names.insert(name.clone());
        fields.push(field.as_ref().clone().with_name(name));
        columns.push(take(column.as_ref(), joined_right, None)?);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(joined_left.len()));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        columns,
        &options,
    )?)
}

//==================================================================================
// 3. Public API
//==================================================================================

/// Antijoins two Arrow key columns, returning row indices for each part.
///
/// A null slot in either key array is an absent key, handled by `null_policy`.
/// Both arrays must share a data type; supported key types are the integer
/// types, `Boolean`, `Utf8`, `LargeUtf8`, `Date32` and `Date64`.
pub fn antijoin_arrays(
    left_keys: &dyn Array,
    right_keys: &dyn Array,
    null_policy: NullValuePolicy,
) -> Result<ArrowAntijoinIndices, AntijoinError> {
    if left_keys.data_type() != right_keys.data_type() {
        return Err(AntijoinError::KeyTypeMismatch {
            left: left_keys.data_type().clone(),
            right: right_keys.data_type().clone(),
        });
    }

    let (l, r, p) = (left_keys, right_keys, null_policy);
    let indices = match left_keys.data_type() {
        DataType::Int8 => join_primitive::<Int8Type>(l, r, p),
        DataType::Int16 => join_primitive::<Int16Type>(l, r, p),
        DataType::Int32 => join_primitive::<Int32Type>(l, r, p),
        DataType::Int64 => join_primitive::<Int64Type>(l, r, p),
        DataType::UInt8 => join_primitive::<UInt8Type>(l, r, p),
        DataType::UInt16 => join_primitive::<UInt16Type>(l, r, p),
        DataType::UInt32 => join_primitive::<UInt32Type>(l, r, p),
        DataType::UInt64 => join_primitive::<UInt64Type>(l, r, p),
        DataType::Date32 => join_primitive::<Date32Type>(l, r, p),
        DataType::Date64 => join_primitive::<Date64Type>(l, r, p),
        DataType::Boolean => join_boolean(l, r, p),
        DataType::Utf8 => join_utf8::<i32>(l, r, p),
        DataType::LargeUtf8 => join_utf8::<i64>(l, r, p),
        dt => Err(AntijoinError::UnsupportedType(format!(
            "Cannot use Arrow type {:?} as an antijoin key",
            dt
        ))),
    }?;

    log::debug!(
        "arrow antijoin on {:?} keys: {} left rows, {} right rows",
        left_keys.data_type(),
        left_keys.len(),
        right_keys.len()
    );
    Ok(indices)
}

/// Antijoins two record batches on the named key columns.
///
/// Retained absent-key rows appear in the complement batches with a null key.
/// In the joined batch, right fields whose name is already in use are renamed
/// with [`RIGHT_COLLISION_PREFIX`], repeatedly if needed, so names stay unique.
pub fn antijoin_record_batches(
    left: &RecordBatch,
    right: &RecordBatch,
    left_on: &str,
    right_on: &str,
    null_policy: NullValuePolicy,
) -> Result<RecordBatchAntijoin, AntijoinError> {
    let left_keys = left.column(left.schema().index_of(left_on)?);
    let right_keys = right.column(right.schema().index_of(right_on)?);

    let indices = antijoin_arrays(left_keys.as_ref(), right_keys.as_ref(), null_policy)?;

    Ok(RecordBatchAntijoin {
        left_complement: take_record_batch(left, &indices.left_complement)?,
        joined: build_joined_batch(left, right, &indices.joined_left, &indices.joined_right)?,
        right_complement: take_record_batch(right, &indices.right_complement)?,
        stats: indices.stats,
    })
}
