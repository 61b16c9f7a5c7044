//! Injectable source of randomness.
//!
//! Map generation and match setup draw from an [`RngOracle`] handed in by the
//! caller, so tests can pin terrain layouts with a fixed seed while the
//! runtime seeds from the clock. No cross-run reproducibility is promised
//! beyond "same seed, same implementation, same sequence".

/// Stream of pseudo-random numbers.
pub trait RngOracle {
    /// Generate the next random u32 value.
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, bound)`. Returns 0 when `bound` is 0.
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32() % bound
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = max.abs_diff(min) + 1;
        min + self.below(span) as i32
    }

    /// True with probability `percent`/100.
    fn chance_percent(&mut self, percent: u32) -> bool {
        self.below(100) < percent
    }

    /// Picks an index with probability proportional to its weight.
    ///
    /// Returns `None` when every weight is zero.
    fn weighted_index(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.below(total);
        for (index, &weight) in weights.iter().enumerate() {
            if roll < weight {
                return Some(index);
            }
            roll -= weight;
        }
        None
    }
}

impl<R: RngOracle + ?Sized> RngOracle for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state, one multiply, one xorshift and
/// one rotate per draw.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed. Equal seeds yield equal streams.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.state = Self::pcg_step(rng.state.wrapping_add(seed));
        rng.state = Self::pcg_step(rng.state);
        rng
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = PcgRng::seeded(42);
        let mut b = PcgRng::seeded(42);
        let left: Vec<u32> = (0..16).map(|_| a.next_u32()).collect();
        let right: Vec<u32> = (0..16).map(|_| b.next_u32()).collect();
        assert_eq!(left, right);

        let mut c = PcgRng::seeded(43);
        let other: Vec<u32> = (0..16).map(|_| c.next_u32()).collect();
        assert_ne!(left, other);
    }

    #[test]
    fn range_stays_inclusive() {
        let mut rng = PcgRng::seeded(7);
        for _ in 0..500 {
            let value = rng.range(-2, 2);
            assert!((-2..=2).contains(&value));
        }
        assert_eq!(rng.range(5, 5), 5);
        assert_eq!(rng.range(9, 3), 9);
    }

    #[test]
    fn weighted_index_skips_zero_weights() {
        let mut rng = PcgRng::seeded(1);
        for _ in 0..200 {
            let index = rng.weighted_index(&[0, 3, 0, 1]);
            assert!(matches!(index, Some(1) | Some(3)));
        }
        assert_eq!(rng.weighted_index(&[0, 0]), None);
        assert_eq!(rng.weighted_index(&[]), None);
    }

    #[test]
    fn below_zero_bound_is_zero() {
        let mut rng = PcgRng::seeded(3);
        assert_eq!(rng.below(0), 0);
        assert!(!rng.chance_percent(0));
        assert!(rng.chance_percent(100));
    }
}
