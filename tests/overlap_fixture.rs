// Randomized overlap scenarios exercised through the public API only.

use antijoin::{antijoin, antijoin_by, antijoin_with, AntijoinResult, NullValuePolicy};
use rand::Rng;

/// Two inputs built from `total_items` distinct keys, `overlap` of which appear
/// on both sides. The position of the overlapping run is random.
struct OverlapFixture<T> {
    left: Vec<T>,
    right: Vec<T>,
    overlap: usize,
    unmatched_left: usize,
    unmatched_right: usize,
}

impl<T> OverlapFixture<T> {
    fn new(total_items: usize, overlap: usize, generator: impl Fn(usize) -> T) -> Self {
        assert!(overlap <= total_items);

        let mut rng = rand::rng();
        let overlap_offset = rng.random_range(0..=total_items - overlap);

        let mut left: Vec<T> = (0..overlap_offset).map(&generator).collect();
        let mut right: Vec<T> = (overlap_offset + overlap..total_items)
            .map(&generator)
            .collect();
        for key in overlap_offset..overlap_offset + overlap {
            left.push(generator(key));
            right.push(generator(key));
        }

        Self {
            left,
            right,
            overlap,
            unmatched_left: overlap_offset,
            unmatched_right: total_items - (overlap_offset + overlap),
        }
    }

    fn verify_exact_result_sizes<U>(&self, result: &AntijoinResult<U, U>) {
        assert_eq!(self.unmatched_left, result.left_complement().len());
        assert_eq!(self.overlap, result.joined_pairs().len());
        assert_eq!(self.unmatched_right, result.right_complement().len());
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Record {
    id: u64,
    payload: String,
}

fn record(key: usize) -> Record {
    Record {
        id: key as u64,
        payload: format!("row-{key}"),
    }
}

#[test]
fn identity_key_over_random_overlap() {
    for _ in 0..20 {
        let fixture = OverlapFixture::new(200, 37, |k| k as i64);
        let result = antijoin(fixture.left.clone(), fixture.right.clone()).unwrap();
        fixture.verify_exact_result_sizes(&result);
    }
}

#[test]
fn extracted_key_over_random_overlap() {
    for _ in 0..20 {
        let fixture = OverlapFixture::new(500, 120, record);
        let result =
            antijoin_by(fixture.left.clone(), fixture.right.clone(), |r: &Record| Some(r.id))
                .unwrap();
        fixture.verify_exact_result_sizes(&result);

        for pair in result.joined_pairs() {
            assert_eq!(pair.left(), pair.right());
        }
    }
}

#[test]
fn full_and_empty_overlap() {
    let full = OverlapFixture::new(50, 50, |k| k as u32);
    let result = antijoin(full.left.clone(), full.right.clone()).unwrap();
    full.verify_exact_result_sizes(&result);
    assert!(result.left_complement().is_empty());
    assert!(result.right_complement().is_empty());

    let disjoint = OverlapFixture::new(50, 0, |k| k as u32);
    let result = antijoin(disjoint.left.clone(), disjoint.right.clone()).unwrap();
    disjoint.verify_exact_result_sizes(&result);
    assert!(result.joined_pairs().is_empty());
}

#[test]
fn null_keys_on_top_of_random_overlap() {
    let fixture = OverlapFixture::new(100, 30, |k| Some(k as u32));
    let mut left = fixture.left.clone();
    let mut right = fixture.right.clone();
    left.extend([None, None]);
    right.extend([None, None, None]);

    for policy in NullValuePolicy::ALL {
        let result = antijoin_with(
            left.clone(),
            right.clone(),
            |k: &Option<u32>| *k,
            |k: &Option<u32>| *k,
            policy,
        )
        .unwrap();

        let left_nulls = if policy.retains_left() { 2 } else { 0 };
        let right_nulls = if policy.retains_right() { 3 } else { 0 };
        assert_eq!(
            result.left_complement().len(),
            fixture.unmatched_left + left_nulls
        );
        assert_eq!(result.joined_pairs().len(), fixture.overlap);
        assert_eq!(
            result.right_complement().len(),
            fixture.unmatched_right + right_nulls
        );
    }
}
