use std::fmt::Debug;
use std::ops::Range;

use rand::Rng;
use rand::SeedableRng;

/// Abstraction for randomness, in order to swap out different sources of randomness.
///
/// Random networks are used to compare the backends against each other and to exercise the
/// propagation algorithms in tests. Implementing this trait for a scripted source allows defining
/// deterministic test-cases for code which consumes randomness.
pub trait Random: Debug {
    /// Generates a random usize in the range `[range.start, range.end)` with equal probability.
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize;

    /// Generates a random i32 in the range `[lb, ub]` with equal probability.
    fn generate_i32_in_range(&mut self, lb: i32, ub: i32) -> i32;

    /// Shuffles `elements` in place (Fisher-Yates), using
    /// [`Random::generate_usize_in_range`] as the only source of randomness.
    ///
    /// # Example
    /// ```rust
    /// # use rand::rngs::SmallRng;
    /// # use rand::SeedableRng;
    /// # use tempus_core::Random;
    /// let mut rng = SmallRng::seed_from_u64(42);
    /// let mut elements = vec![1, 2, 3, 4];
    /// rng.shuffle(&mut elements);
    ///
    /// elements.sort();
    /// assert_eq!(elements, vec![1, 2, 3, 4]);
    /// ```
    fn shuffle<T>(&mut self, elements: &mut [T])
    where
        Self: Sized,
    {
        for index in (1..elements.len()).rev() {
            let other = self.generate_usize_in_range(0..index + 1);
            elements.swap(index, other);
        }
    }
}

// We provide a blanket implementation of the trait for any type which implements `SeedableRng`,
// `Rng` and `Debug` to ensure that we can use any "regular" random generator where we expect an
// implementation of Random.
impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
        self.gen_range(range)
    }

    fn generate_i32_in_range(&mut self, lb: i32, ub: i32) -> i32 {
        self.gen_range(lb..=ub)
    }
}
