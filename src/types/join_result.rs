//! This module defines the canonical output types of an antijoin.

use std::fmt;
use std::hash::Hash;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

/// Identifies one of the two inputs of a join.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JoinSide {
    Left,
    Right,
}

impl fmt::Display for JoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinSide::Left => f.write_str("left"),
            JoinSide::Right => f.write_str("right"),
        }
    }
}

//==================================================================================
// 1. JoinedPair
//==================================================================================

/// A left element and a right element that produced equal keys.
///
/// Pairs are created once during the probe pass and never mutated afterwards,
/// so the fields are only reachable through accessors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinedPair<L, R> {
    left: L,
    right: R,
}

impl<L, R> JoinedPair<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &L {
        &self.left
    }

    pub fn right(&self) -> &R {
        &self.right
    }

    pub fn into_parts(self) -> (L, R) {
        (self.left, self.right)
    }
}

impl<L, R> From<(L, R)> for JoinedPair<L, R> {
    fn from((left, right): (L, R)) -> Self {
        Self::new(left, right)
    }
}

//==================================================================================
// 2. Statistics
//==================================================================================

/// Counters describing how one list-semantics call partitioned its inputs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AntijoinStats {
    /// Elements read from the left input.
    pub left_rows: usize,
    /// Elements read from the right input.
    pub right_rows: usize,
    /// Left elements whose key was absent.
    pub left_null_keys: usize,
    /// Right elements whose key was absent.
    pub right_null_keys: usize,
    /// Right elements displaced from the index by a later element with the same key.
    /// These appear in no output container.
    pub right_duplicates_overwritten: usize,
    /// Absent-key left elements appended to the left complement.
    pub nulls_retained_left: usize,
    /// Absent-key right elements appended to the right complement.
    pub nulls_retained_right: usize,
}

//==================================================================================
// 3. List-semantics Result
//==================================================================================

/// The three-way partition produced by the list-semantics engine.
///
/// `left_complement` holds unmatched left elements in left input order, followed
/// by any retained absent-key left elements. `joined_pairs` follows left input
/// order. `right_complement` holds the surviving index entries in right input
/// order, followed by any retained absent-key right elements.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AntijoinResult<L, R> {
    left_complement: Vec<L>,
    joined_pairs: Vec<JoinedPair<L, R>>,
    right_complement: Vec<R>,
    stats: AntijoinStats,
}

impl<L, R> AntijoinResult<L, R> {
    pub(crate) fn new(
        left_complement: Vec<L>,
        joined_pairs: Vec<JoinedPair<L, R>>,
        right_complement: Vec<R>,
        stats: AntijoinStats,
    ) -> Self {
        Self {
            left_complement,
            joined_pairs,
            right_complement,
            stats,
        }
    }

    pub fn left_complement(&self) -> &[L] {
        &self.left_complement
    }

    pub fn joined_pairs(&self) -> &[JoinedPair<L, R>] {
        &self.joined_pairs
    }

    pub fn right_complement(&self) -> &[R] {
        &self.right_complement
    }

    pub fn stats(&self) -> &AntijoinStats {
        &self.stats
    }

    /// Returns `true` when all three containers are empty.
    pub fn is_empty(&self) -> bool {
        self.left_complement.is_empty()
            && self.joined_pairs.is_empty()
            && self.right_complement.is_empty()
    }

    /// Consumes the result, returning `(left_complement, joined_pairs, right_complement)`.
    pub fn into_parts(self) -> (Vec<L>, Vec<JoinedPair<L, R>>, Vec<R>) {
        (self.left_complement, self.joined_pairs, self.right_complement)
    }
}

//==================================================================================
// 4. Set-semantics Result
//==================================================================================

/// The duplicate-free partition produced by the set-semantics engine.
#[derive(Debug, Clone)]
pub struct SetAntijoinResult<L, R>
where
    L: Eq + Hash,
    R: Eq + Hash,
{
    left_complement: HashSet<L>,
    joined_pairs: HashSet<JoinedPair<L, R>>,
    right_complement: HashSet<R>,
}

impl<L, R> SetAntijoinResult<L, R>
where
    L: Eq + Hash,
    R: Eq + Hash,
{
    pub(crate) fn new(
        left_complement: HashSet<L>,
        joined_pairs: HashSet<JoinedPair<L, R>>,
        right_complement: HashSet<R>,
    ) -> Self {
        Self {
            left_complement,
            joined_pairs,
            right_complement,
        }
    }

    pub fn left_complement(&self) -> &HashSet<L> {
        &self.left_complement
    }

    pub fn joined_pairs(&self) -> &HashSet<JoinedPair<L, R>> {
        &self.joined_pairs
    }

    pub fn right_complement(&self) -> &HashSet<R> {
        &self.right_complement
    }

    pub fn is_empty(&self) -> bool {
        self.left_complement.is_empty()
            && self.joined_pairs.is_empty()
            && self.right_complement.is_empty()
    }

    pub fn into_parts(self) -> (HashSet<L>, HashSet<JoinedPair<L, R>>, HashSet<R>) {
        (self.left_complement, self.joined_pairs, self.right_complement)
    }
}
