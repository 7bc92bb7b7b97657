use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared, injectable source of randomness for the mock tools.
///
/// Clones share the same generator, so a seeded source produces one
/// reproducible sequence across every tool that holds it.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: Arc<Mutex<StdRng>>,
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource {
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StdRng> {
        // The generator holds no invariants a panicking holder could break.
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn choose<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut *self.lock())
    }

    pub fn range_inclusive(&self, range: RangeInclusive<i32>) -> i32 {
        self.lock().random_range(range)
    }

    /// Picks up to `amount` distinct elements in random order.
    pub fn sample<'a, T>(&self, items: &'a [T], amount: usize) -> Vec<&'a T> {
        let amount = amount.min(items.len());
        items.choose_multiple(&mut *self.lock(), amount).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_be_reproducible_with_same_seed() {
        let first = RandomSource::seeded(42);
        let second = RandomSource::seeded(42);

        let a: Vec<i32> = (0..10).map(|_| first.range_inclusive(0..=1000)).collect();
        let b: Vec<i32> = (0..10).map(|_| second.range_inclusive(0..=1000)).collect();

        assert_eq!(a, b);
    }

    #[test]
    fn should_share_state_between_clones() {
        let source = RandomSource::seeded(7);
        let clone = source.clone();
        let reference = RandomSource::seeded(7);

        let interleaved = vec![source.range_inclusive(0..=1000), clone.range_inclusive(0..=1000)];
        let sequential = vec![
            reference.range_inclusive(0..=1000),
            reference.range_inclusive(0..=1000),
        ];

        assert_eq!(interleaved, sequential);
    }

    #[test]
    fn should_stay_within_range() {
        let source = RandomSource::seeded(1);
        for _ in 0..500 {
            let value = source.range_inclusive(-10..=39);
            assert!((-10..=39).contains(&value));
        }
    }

    #[test]
    fn should_choose_from_slice() {
        let source = RandomSource::seeded(3);
        let items = ["a", "b", "c"];

        let chosen = source.choose(&items).unwrap();
        assert!(items.contains(chosen));

        let empty: [&str; 0] = [];
        assert!(source.choose(&empty).is_none());
    }

    #[test]
    fn should_sample_without_replacement() {
        let source = RandomSource::seeded(5);
        let items = [1, 2, 3, 4, 5];

        let mut sampled: Vec<i32> = source.sample(&items, 5).into_iter().copied().collect();
        sampled.sort();

        assert_eq!(sampled, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn should_cap_sample_at_pool_size() {
        let source = RandomSource::seeded(5);
        let items = [1, 2, 3];

        assert_eq!(source.sample(&items, 10).len(), 3);
    }
}
