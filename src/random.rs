use rand::prelude::*;

/// Weighted outcome table: `(value, weight)` pairs
pub type Weights = &'static [(i32, u32)];

/// Seeded pseudorandom source; the same seed replays the same decisions
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `0..n`; 0 when `n` is 0
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform integer in `lo..=hi`
    pub fn between(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Draw one value from a weight table
    pub fn weighted(&mut self, table: Weights) -> i32 {
        let total: u32 = table.iter().map(|&(_, w)| w).sum();
        let mut roll = self.below(total);
        for &(value, weight) in table {
            if roll < weight {
                return value;
            }
            roll -= weight;
        }
        table.last().map(|&(value, _)| value).unwrap_or(0)
    }

    /// Uniform pick from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..items.len());
        items.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKEWED: Weights = &[(-1, 1), (0, 0), (1, 9)];

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomSource::new(42);
        let mut b = RandomSource::new(42);
        let xs: Vec<u32> = (0..32).map(|_| a.below(100)).collect();
        let ys: Vec<u32> = (0..32).map(|_| b.below(100)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn between_is_inclusive() {
        let mut rng = RandomSource::new(7);
        let draws: Vec<i32> = (0..500).map(|_| rng.between(-2, 2)).collect();
        assert!(draws.iter().all(|d| (-2..=2).contains(d)));
        assert!(draws.contains(&-2));
        assert!(draws.contains(&2));
        assert_eq!(rng.between(3, 3), 3);
    }

    #[test]
    fn weighted_never_draws_zero_weight() {
        let mut rng = RandomSource::new(3);
        let draws: Vec<i32> = (0..1000).map(|_| rng.weighted(SKEWED)).collect();
        assert!(!draws.contains(&0));
        let ups = draws.iter().filter(|&&d| d == 1).count();
        assert!(ups > 800, "expected a strong bias, got {ups}/1000");
    }

    #[test]
    fn below_zero_is_zero() {
        let mut rng = RandomSource::new(1);
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = RandomSource::new(1);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[9]), Some(&9));
    }
}
