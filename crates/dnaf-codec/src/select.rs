//! Seeded chunk selection.
//!
//! `select` is the shared pure function both sides of a session rely on: the
//! decoder re-derives each droplet's source chunks from nothing but the seed
//! and the session's degree table. One generator draw picks the degree, the
//! remaining draws run a partial Fisher-Yates over the chunk indices so the
//! chosen set is distinct and unbiased.

use crate::degree::DegreeTable;
use crate::error::SelectError;
use crate::rng::SplitMix64;

/// A droplet's derived degree and source chunk indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Number of chunks combined into the droplet.
    pub degree: usize,
    /// Distinct chunk indices, in draw order.
    pub indices: Vec<usize>,
}

/// Derive the chunk selection for `seed`.
///
/// Pure function of `(seed, table)`: the same inputs always produce the same
/// selection, on any build.
///
/// # Errors
///
/// Returns `SelectError::DegreeOutOfRange` if the degree table violates its
/// `[1, chunk_count]` contract.
pub fn select(seed: u64, table: &DegreeTable) -> Result<Selection, SelectError> {
    let chunk_count = table.chunk_count();
    let mut rng = SplitMix64::new(seed);

    let degree = table.degree_for(rng.next_u64());
    if degree == 0 || degree > chunk_count {
        return Err(SelectError::DegreeOutOfRange {
            degree,
            chunk_count,
        });
    }

    let mut pool: Vec<usize> = (0..chunk_count).collect();
    for i in 0..degree {
        let j = i + rng.next_below((chunk_count - i) as u64) as usize;
        pool.swap(i, j);
    }
    pool.truncate(degree);

    Ok(Selection {
        degree,
        indices: pool,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_pure() {
        let table = DegreeTable::new(8).unwrap();
        for seed in 0..64 {
            let a = select(seed, &table).unwrap();
            let b = select(seed, &table).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn indices_are_distinct_and_in_range() {
        for chunk_count in [1, 2, 5, 8, 33] {
            let table = DegreeTable::new(chunk_count).unwrap();
            for seed in 0..256 {
                let sel = select(seed, &table).unwrap();
                assert_eq!(sel.indices.len(), sel.degree);
                assert!((1..=chunk_count).contains(&sel.degree));

                let mut sorted = sel.indices.clone();
                sorted.sort_unstable();
                sorted.dedup();
                assert_eq!(sorted.len(), sel.degree, "duplicate index at seed {seed}");
                assert!(sorted.iter().all(|&i| i < chunk_count));
            }
        }
    }

    #[test]
    fn single_chunk_always_selects_it() {
        let table = DegreeTable::new(1).unwrap();
        for seed in [0, 5, 999_999] {
            let sel = select(seed, &table).unwrap();
            assert_eq!(sel.degree, 1);
            assert_eq!(sel.indices, vec![0]);
        }
    }

    #[test]
    fn golden_selections() {
        // Pinned vectors; a change here breaks every stream ever encoded.
        let table = DegreeTable::new(8).unwrap();
        let sel = select(0, &table).unwrap();
        assert_eq!((sel.degree, sel.indices), (3, vec![4, 3, 6]));
        let sel = select(3, &table).unwrap();
        assert_eq!((sel.degree, sel.indices), (1, vec![1]));
        let sel = select(42, &table).unwrap();
        assert_eq!((sel.degree, sel.indices), (2, vec![3, 1]));
        let sel = select(9999, &table).unwrap();
        assert_eq!((sel.degree, sel.indices), (2, vec![1, 2]));

        let table = DegreeTable::new(16).unwrap();
        let sel = select(7, &table).unwrap();
        assert_eq!((sel.degree, sel.indices), (3, vec![12, 7, 5]));
        let sel = select(100, &table).unwrap();
        assert_eq!((sel.degree, sel.indices), (2, vec![4, 8]));
    }
}
