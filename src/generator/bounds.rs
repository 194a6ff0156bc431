use std::ops::Add;

use rand::{
    distributions::{uniform::SampleUniform, Distribution, Standard},
    Rng,
};

/// An inclusive minimum/maximum range used to configure generated sizes
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + SampleUniform + Copy> Bounds<T> {
    /// Samples a value uniformly from the range, both boundaries included
    pub fn gen<R: Rng>(&self, rng: &mut R) -> T
    where
        Standard: Distribution<T>,
        T: Add<Output = T> + From<u8>,
    {
        // gen_range excludes the upper bound, so add 1 to make it inclusive.
        // From<u8> is how we name "1" for any numeric T.
        rng.gen_range(self.min, self.max + 1.into())
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

impl<T> From<(T, T)> for Bounds<T> {
    fn from((min, max): (T, T)) -> Self {
        Bounds { min, max }
    }
}
