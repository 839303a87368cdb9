//! This module contains the set-semantics antijoin engine.
//!
//! It shares the build/probe structure of the list engine but produces
//! duplicate-free, unordered containers. Elements whose key is absent are
//! excluded from every output; there is no null retention.

use std::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::error::AntijoinError;
use crate::types::{JoinSide, JoinedPair, SetAntijoinResult};

/// Runs the set-semantics antijoin over nullable input slots.
///
/// Right-side key collisions are resolved last-write-wins, as in the list
/// engine. On the left, the first element seen for a key decides that key's
/// fate: it either claims the indexed right element or becomes the key's
/// representative in the left complement. Later left elements with the same key
/// are skipped.
pub fn antijoin_set_slots<L, R, X, LI, RI, FL, FR>(
    left: LI,
    right: RI,
    left_key_of: FL,
    right_key_of: FR,
) -> Result<SetAntijoinResult<L, R>, AntijoinError>
where
    LI: IntoIterator<Item = Option<L>>,
    RI: IntoIterator<Item = Option<R>>,
    L: Eq + Hash,
    R: Eq + Hash,
    X: Eq + Hash,
    FL: Fn(&L) -> Option<X>,
    FR: Fn(&R) -> Option<X>,
{
    let mut index: HashMap<X, R> = HashMap::new();
    for (position, slot) in right.into_iter().enumerate() {
        let element = slot.ok_or(AntijoinError::InvalidInput {
            side: JoinSide::Right,
            position,
        })?;
        if let Some(key) = right_key_of(&element) {
            index.insert(key, element);
        }
    }

    let mut consumed: HashSet<X> = HashSet::new();
    let mut unmatched: HashMap<X, L> = HashMap::new();
    let mut joined_pairs: HashSet<JoinedPair<L, R>> = HashSet::new();

    for (position, slot) in left.into_iter().enumerate() {
        let element = slot.ok_or(AntijoinError::InvalidInput {
            side: JoinSide::Left,
            position,
        })?;
        let Some(key) = left_key_of(&element) else {
            continue;
        };

        if consumed.contains(&key) {
            continue;
        }
        match index.remove(&key) {
            Some(matched) => {
                joined_pairs.insert(JoinedPair::new(element, matched));
                consumed.insert(key);
            }
            None => {
                unmatched.entry(key).or_insert(element);
            }
        }
    }

    let left_complement: HashSet<L> = unmatched.into_values().collect();
    let right_complement: HashSet<R> = index.into_values().collect();

    log::debug!(
        "set antijoin: left_complement={} joined_pairs={} right_complement={}",
        left_complement.len(),
        joined_pairs.len(),
        right_complement.len()
    );

    Ok(SetAntijoinResult::new(
        left_complement,
        joined_pairs,
        right_complement,
    ))
}

/// Runs the set-semantics antijoin over plain element sequences.
pub fn antijoin_set<L, R, X, LI, RI, FL, FR>(
    left: LI,
    right: RI,
    left_key_of: FL,
    right_key_of: FR,
) -> Result<SetAntijoinResult<L, R>, AntijoinError>
where
    LI: IntoIterator<Item = L>,
    RI: IntoIterator<Item = R>,
    L: Eq + Hash,
    R: Eq + Hash,
    X: Eq + Hash,
    FL: Fn(&L) -> Option<X>,
    FR: Fn(&R) -> Option<X>,
{
    antijoin_set_slots(
        left.into_iter().map(Some),
        right.into_iter().map(Some),
        left_key_of,
        right_key_of,
    )
}
