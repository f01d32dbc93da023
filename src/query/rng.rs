//! Deterministic randomness for shuffling and drawing from card lists.
//!
//! ```
//! use fab_catalog::query::ListRng;
//!
//! let mut a = ListRng::new(42);
//! let mut b = ListRng::new(42);
//! assert_eq!(a.gen_index(100), b.gen_index(100));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded RNG used by `CardList::shuffle` and `CardList::draw`.
///
/// The same seed always produces the same shuffles and draws.
#[derive(Clone, Debug)]
pub struct ListRng {
    inner: ChaCha8Rng,
}

impl ListRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Random index in `0..len`. `len` must be non-zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_indices() {
        let mut a = ListRng::new(7);
        let mut b = ListRng::new(7);
        let first: Vec<usize> = (0..50).map(|_| a.gen_index(1000)).collect();
        let second: Vec<usize> = (0..50).map(|_| b.gen_index(1000)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_shuffle_keeps_every_value() {
        let mut rng = ListRng::new(1);
        let mut values: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut values);
        values.sort_unstable();
        assert_eq!(values, (0..20).collect::<Vec<_>>());
    }
}
