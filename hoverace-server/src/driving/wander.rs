use noise::{NoiseFn, Perlin};
use rand::Rng;

// Smooth pseudo-random signal in [0, 1]. Each vehicle samples its own row of
// the noise field so cars running the same logic don't weave in lockstep.
#[derive(Clone, Copy)]
pub struct Wander {
    perlin: Perlin,
    row: f64,
}

impl Wander {
    pub fn new(row: f64) -> Self {
        Self::with_seed(Perlin::DEFAULT_SEED, row)
    }

    // a different seed gives a signal independent of the default one
    pub fn with_seed(seed: u32, row: f64) -> Self {
        Self {
            perlin: Perlin::new(seed),
            row,
        }
    }

    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        Self::new(rng.gen_range(0.0..100.0))
    }

    pub fn row(&self) -> f64 {
        self.row
    }

    pub fn sample(&self, x: f64) -> f64 {
        // perlin output is roughly [-1, 1]
        ((self.perlin.get([x, self.row]) + 1.0) / 2.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn samples_stay_in_unit_range() {
        let wander = Wander::new(42.7);
        for step in 0..500 {
            let value = wander.sample(step as f64 * 0.37);
            assert!((0.0..=1.0).contains(&value), "{} out of range", value);
        }
    }

    #[test]
    fn same_seed_same_signal() {
        let a = Wander::from_rng(&mut StdRng::seed_from_u64(7));
        let b = Wander::from_rng(&mut StdRng::seed_from_u64(7));
        assert_eq!(a.row(), b.row());
        assert_eq!(a.sample(3.3), b.sample(3.3));
    }

    #[test]
    fn signal_is_smooth() {
        let wander = Wander::new(12.5);
        let step = 0.001;
        for i in 0..100 {
            let x = i as f64 * 0.1;
            assert!((wander.sample(x + step) - wander.sample(x)).abs() < 0.01);
        }
    }
}
