//! Sources of initial connection weights.

use crate::error::{Error, Result};

use rand::distributions::{IndependentSample, Range};
use rand::{Rng, SeedableRng, ThreadRng, XorShiftRng};

/// Supplies a real value in a bounded range on demand.
///
/// Every non-input layer draws one value per connection when it is created,
/// walking its weight matrix row by row (predecessor neuron `i` outer, own
/// neuron `j` inner).
pub trait WeightSource {
    fn next_weight(&mut self) -> f64;
}

impl<'a, S: WeightSource + ?Sized> WeightSource for &'a mut S {
    fn next_weight(&mut self) -> f64 {
        (**self).next_weight()
    }
}

/// Draws weights uniformly from `[low, high)` using any `rand::Rng`.
pub struct Uniform<R: Rng> {
    rng: R,
    range: Range<f64>,
}

impl<R: Rng> Uniform<R> {
    /// Wraps `rng`, sampling from `[low, high)`.
    pub fn new(rng: R, low: f64, high: f64) -> Result<Self> {
        if !(low < high) || !low.is_finite() || !high.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "weight range [{}, {}) is empty",
                low, high
            )));
        }
        Ok(Uniform {
            rng,
            range: Range::new(low, high),
        })
    }
}

impl Uniform<ThreadRng> {
    /// Samples from `[low, high)` using the thread-local generator.
    pub fn thread(low: f64, high: f64) -> Result<Self> {
        Uniform::new(rand::thread_rng(), low, high)
    }
}

impl Uniform<XorShiftRng> {
    /// A reproducible source: equal seeds yield equal weight sequences.
    ///
    /// The seed must not be all zeros.
    pub fn seeded(seed: [u32; 4], low: f64, high: f64) -> Result<Self> {
        if seed == [0; 4] {
            return Err(Error::InvalidArgument("seed must not be all zeros".into()));
        }
        Uniform::new(XorShiftRng::from_seed(seed), low, high)
    }
}

impl<R: Rng> WeightSource for Uniform<R> {
    fn next_weight(&mut self) -> f64 {
        self.range.ind_sample(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_in_range() {
        let mut source = Uniform::seeded([7, 11, 13, 17], -0.5, 0.25).unwrap();
        for _ in 0..1000 {
            let w = source.next_weight();
            assert!(w >= -0.5 && w < 0.25, "{} out of range", w);
        }
    }

    #[test]
    fn seeded_is_reproducible() {
        let mut a = Uniform::seeded([1, 2, 3, 4], -1.0, 1.0).unwrap();
        let mut b = Uniform::seeded([1, 2, 3, 4], -1.0, 1.0).unwrap();
        for _ in 0..50 {
            assert_eq!(a.next_weight(), b.next_weight());
        }
    }

    #[test]
    fn rejects_empty_range() {
        assert!(Uniform::thread(1.0, 1.0).is_err());
        assert!(Uniform::thread(1.0, -1.0).is_err());
        assert!(Uniform::thread(std::f64::NAN, 1.0).is_err());
    }

    #[test]
    fn rejects_zero_seed() {
        assert!(Uniform::seeded([0; 4], -1.0, 1.0).is_err());
    }

    #[test]
    fn borrowed_source() {
        fn draw<S: WeightSource>(mut source: S) -> f64 {
            source.next_weight()
        }
        let mut source = Uniform::seeded([4, 3, 2, 1], 0.0, 1.0).unwrap();
        let w = draw(&mut source);
        assert!(w >= 0.0 && w < 1.0);
        assert_ne!(w, source.next_weight());
    }
}
