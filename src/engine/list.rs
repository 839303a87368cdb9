//! This module contains the list-semantics antijoin engine, the general form of
//! the operation.
//!
//! The engine makes one pass over the right input to build a key index, one
//! pass over the left input to probe (and consume) it, then drains whatever the
//! probe left behind. Input order and duplicate elements are preserved; a
//! right-side key collision is resolved last-write-wins, and a matched right
//! element can be claimed by at most one left element.

use std::hash::Hash;

use hashbrown::HashMap;

use crate::config::NullValuePolicy;
use crate::error::AntijoinError;
use crate::observability;
use crate::types::{AntijoinResult, AntijoinStats, JoinSide, JoinedPair};

//==================================================================================
// 1. Private Core Logic
//==================================================================================

/// The right-side index built in the first pass.
///
/// Elements live in `slots` in right input order; `positions` maps each key to
/// the slot of the last element seen with that key. A displaced or consumed
/// slot is set to `None`, so draining `slots` yields the unmatched survivors in
/// their original order.
struct RightIndex<X, R> {
    positions: HashMap<X, usize>,
    slots: Vec<Option<R>>,
    nulls: Vec<R>,
}

impl<X, R> RightIndex<X, R>
where
    X: Eq + Hash,
{
    fn build<RI, FR>(
        right: RI,
        right_key_of: FR,
        stats: &mut AntijoinStats,
    ) -> Result<Self, AntijoinError>
    where
        RI: IntoIterator<Item = Option<R>>,
        FR: Fn(&R) -> Option<X>,
    {
        let right = right.into_iter();
        let (capacity, _) = right.size_hint();
        let mut index = RightIndex {
            positions: HashMap::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            nulls: Vec::new(),
        };

        for (position, slot) in right.enumerate() {
            let element = slot.ok_or(AntijoinError::InvalidInput {
                side: JoinSide::Right,
                position,
            })?;
            stats.right_rows += 1;

            match right_key_of(&element) {
                None => {
                    stats.right_null_keys += 1;
                    index.nulls.push(element);
                }
                Some(key) => {
                    let slot_idx = index.slots.len();
                    index.slots.push(Some(element));
                    if let Some(displaced) = index.positions.insert(key, slot_idx) {
                        // Last write wins; the earlier element leaves the index for good.
                        index.slots[displaced] = None;
                        stats.right_duplicates_overwritten += 1;
                        log::trace!(
                            "right element at position {} displaced by a later duplicate key",
                            displaced
                        );
                    }
                }
            }
        }

        Ok(index)
    }

    /// Removes and returns the element indexed under `key`, if any.
    fn take(&mut self, key: &X) -> Option<R> {
        let slot_idx = self.positions.remove(key)?;
        self.slots.get_mut(slot_idx).and_then(Option::take)
    }

    /// Consumes the index, returning the unmatched survivors in right input
    /// order together with the absent-key elements.
    fn drain(self) -> (Vec<R>, Vec<R>) {
        (self.slots.into_iter().flatten().collect(), self.nulls)
    }
}

/// Shared body of every list-semantics entry point. `stats_level` is the level
/// the per-call summary is logged at.
pub(crate) fn execute<L, R, X, LI, RI, FL, FR>(
    left: LI,
    right: RI,
    left_key_of: FL,
    right_key_of: FR,
    null_policy: NullValuePolicy,
    stats_level: log::Level,
) -> Result<AntijoinResult<L, R>, AntijoinError>
where
    LI: IntoIterator<Item = Option<L>>,
    RI: IntoIterator<Item = Option<R>>,
    X: Eq + Hash,
    FL: Fn(&L) -> Option<X>,
    FR: Fn(&R) -> Option<X>,
{
    let mut stats = AntijoinStats::default();

    // --- Build phase ---
    let mut index = RightIndex::build(right, right_key_of, &mut stats)?;

    // --- Probe phase ---
    let left = left.into_iter();
    let (capacity, _) = left.size_hint();
    let mut left_complement: Vec<L> = Vec::with_capacity(capacity);
    let mut joined_pairs: Vec<JoinedPair<L, R>> = Vec::new();
    let mut left_nulls: Vec<L> = Vec::new();

    for (position, slot) in left.enumerate() {
        let element = slot.ok_or(AntijoinError::InvalidInput {
            side: JoinSide::Left,
            position,
        })?;
        stats.left_rows += 1;

        match left_key_of(&element) {
            None => {
                stats.left_null_keys += 1;
                left_nulls.push(element);
            }
            Some(key) => match index.take(&key) {
                Some(matched) => joined_pairs.push(JoinedPair::new(element, matched)),
                None => left_complement.push(element),
            },
        }
    }

    // --- Drain phase ---
    let (mut right_complement, right_nulls) = index.drain();

    // --- Null policy ---
    if null_policy.retains_left() {
        stats.nulls_retained_left = left_nulls.len();
        left_complement.extend(left_nulls);
    }
    if null_policy.retains_right() {
        stats.nulls_retained_right = right_nulls.len();
        right_complement.extend(right_nulls);
    }

    let result = AntijoinResult::new(left_complement, joined_pairs, right_complement, stats);
    observability::log_stats(&result, null_policy, stats_level);
    Ok(result)
}

//==================================================================================
// 2. Public API (General Form)
//==================================================================================

/// Runs the list-semantics antijoin over nullable input slots.
///
/// This is the general form every other entry point delegates to. A `None` slot
/// is a missing element and fails the whole call with
/// [`AntijoinError::InvalidInput`]; an element whose extractor returns `None`
/// has an absent key and is handled by `null_policy`. The right input is
/// consumed before the left, so a missing element on the right is reported
/// first when both sides are malformed.
///
/// # Returns
/// The three-way partition. See [`AntijoinResult`] for the ordering guarantees.
pub fn antijoin_slots<L, R, X, LI, RI, FL, FR>(
    left: LI,
    right: RI,
    left_key_of: FL,
    right_key_of: FR,
    null_policy: NullValuePolicy,
) -> Result<AntijoinResult<L, R>, AntijoinError>
where
    LI: IntoIterator<Item = Option<L>>,
    RI: IntoIterator<Item = Option<R>>,
    X: Eq + Hash,
    FL: Fn(&L) -> Option<X>,
    FR: Fn(&R) -> Option<X>,
{
    execute(
        left,
        right,
        left_key_of,
        right_key_of,
        null_policy,
        log::Level::Debug,
    )
}

/// Runs the list-semantics antijoin over plain element sequences.
pub fn antijoin_with<L, R, X, LI, RI, FL, FR>(
    left: LI,
    right: RI,
    left_key_of: FL,
    right_key_of: FR,
    null_policy: NullValuePolicy,
) -> Result<AntijoinResult<L, R>, AntijoinError>
where
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    X: Eq + Hash,
    FL: Fn(&L) -> Option<X>,
    FR: Fn(&R) -> Option<X>,
{
    antijoin_slots(
        left.into_iter().map(Some),
        right.into_iter().map(Some),
        left_key_of,
        right_key_of,
        null_policy,
    )
}

//==================================================================================
// 3. Convenience Forms
//==================================================================================

/// Convenience form for two inputs of the same type sharing one key extractor.
/// Absent-key elements are dropped (`NullValuePolicy::RetainNone`).
pub fn antijoin_by<T, X, LI, RI, F>(
    left: LI,
    right: RI,
    key_of: F,
) -> Result<AntijoinResult<T, T>, AntijoinError>
where
    LI: IntoIterator<Item = T>,
    RI: IntoIterator<Item = T>,
    X: Eq + Hash,
    F: Fn(&T) -> Option<X>,
{
    antijoin_with(left, right, &key_of, &key_of, NullValuePolicy::RetainNone)
}

/// Convenience form for two inputs of the same type where the element's own
/// equality and hash are the comparison key.
///
/// This is not always what you want: records that represent the same entity
/// but differ in non-key fields will not match. Use [`antijoin_by`] with a key
/// extractor for those.
pub fn antijoin<T, LI, RI>(left: LI, right: RI) -> Result<AntijoinResult<T, T>, AntijoinError>
where
    LI: IntoIterator<Item = T>,
    RI: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    antijoin_by(left, right, |element: &T| Some(element.clone()))
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tagged {
        key: Option<u32>,
        tag: &'static str,
    }

    fn tagged(key: Option<u32>, tag: &'static str) -> Tagged {
        Tagged { key, tag }
    }

    fn key_of(t: &Tagged) -> Option<u32> {
        t.key
    }

    #[test]
    fn test_right_complement_keeps_right_input_order() {
        let right = vec![50, 10, 40, 20, 30];
        let result = antijoin(vec![40, 10], right).unwrap();
        assert_eq!(result.right_complement(), &[50, 20, 30]);
    }

    #[test]
    fn test_duplicate_survivor_takes_position_of_last_occurrence() {
        let right = vec![
            tagged(Some(1), "a"),
            tagged(Some(2), "b"),
            tagged(Some(1), "c"),
        ];
        let result = antijoin_by(Vec::<Tagged>::new(), right, key_of).unwrap();
        let tags: Vec<_> = result.right_complement().iter().map(|t| t.tag).collect();
        assert_eq!(tags, vec!["b", "c"]);
        assert_eq!(result.stats().right_duplicates_overwritten, 1);
    }

    #[test]
    fn test_matched_right_element_is_consumed() {
        let left = vec![tagged(Some(7), "l1"), tagged(Some(7), "l2")];
        let right = vec![tagged(Some(7), "r")];
        let result = antijoin_by(left, right, key_of).unwrap();

        assert_eq!(result.joined_pairs().len(), 1);
        assert_eq!(result.joined_pairs()[0].left().tag, "l1");
        assert_eq!(result.joined_pairs()[0].right().tag, "r");
        // The second left element finds the slot already claimed.
        assert_eq!(result.left_complement(), &[tagged(Some(7), "l2")]);
        assert!(result.right_complement().is_empty());
    }

    #[test]
    fn test_retained_nulls_follow_unmatched_elements() {
        let left = vec![tagged(None, "ln"), tagged(Some(1), "l1")];
        let right = vec![tagged(None, "rn"), tagged(Some(2), "r2")];
        let result =
            antijoin_with(left, right, key_of, key_of, NullValuePolicy::RetainFull).unwrap();

        let left_tags: Vec<_> = result.left_complement().iter().map(|t| t.tag).collect();
        let right_tags: Vec<_> = result.right_complement().iter().map(|t| t.tag).collect();
        assert_eq!(left_tags, vec!["l1", "ln"]);
        assert_eq!(right_tags, vec!["r2", "rn"]);
        assert_eq!(result.stats().nulls_retained_left, 1);
        assert_eq!(result.stats().nulls_retained_right, 1);
    }

    #[test]
    fn test_null_keys_never_match_each_other() {
        let left = vec![tagged(None, "l")];
        let right = vec![tagged(None, "r")];
        let result =
            antijoin_with(left, right, key_of, key_of, NullValuePolicy::RetainFull).unwrap();
        assert!(result.joined_pairs().is_empty());
        assert_eq!(result.left_complement().len(), 1);
        assert_eq!(result.right_complement().len(), 1);
    }

    #[test]
    fn test_missing_element_position_is_reported() {
        let err = antijoin_slots(
            vec![Some(1), Some(2), None],
            vec![Some(1)],
            |x: &i32| Some(*x),
            |x: &i32| Some(*x),
            NullValuePolicy::RetainNone,
        )
        .unwrap_err();
        match err {
            AntijoinError::InvalidInput { side, position } => {
                assert_eq!(side, JoinSide::Left);
                assert_eq!(position, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_stats_count_rows_and_null_keys() {
        let left = vec![tagged(Some(1), "a"), tagged(None, "b"), tagged(Some(3), "c")];
        let right = vec![tagged(None, "x"), tagged(None, "y"), tagged(Some(1), "z")];
        let result =
            antijoin_with(left, right, key_of, key_of, NullValuePolicy::RetainNone).unwrap();
        let stats = result.stats();
        assert_eq!(stats.left_rows, 3);
        assert_eq!(stats.right_rows, 3);
        assert_eq!(stats.left_null_keys, 1);
        assert_eq!(stats.right_null_keys, 2);
        assert_eq!(stats.nulls_retained_left, 0);
        assert_eq!(stats.nulls_retained_right, 0);
    }
}
