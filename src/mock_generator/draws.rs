//! Random draw capability
//!
//! Every random decision the generator makes goes through [`Draws`], so a
//! scripted source can pin exact outputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the primitive draws used by the generator
pub trait Draws: Send + Sync {
    /// Uniform integer in `0..upper` (0 when `upper` is 0)
    fn visits_step(&mut self, upper: u64) -> u64;

    /// Uniform real in `[-spread, spread)` (0.0 unless `spread` is finite and positive)
    fn delta(&mut self, spread: f64) -> f64;

    /// Uniform index in `0..len`
    fn index(&mut self, len: usize) -> usize;
}

/// Closed enumeration that can be drawn uniformly
pub trait Closed: Copy + 'static {
    /// Every member, non-empty
    const ALL: &'static [Self];
}

/// Pick one member of a closed enumeration.
///
/// The drawn index is reduced modulo the member count, so any draw source
/// yields a member.
pub fn choose<T: Closed>(draws: &mut dyn Draws) -> T {
    let members = T::ALL;
    members[draws.index(members.len()) % members.len()]
}

/// [`Draws`] backed by a `rand` generator
pub struct RandomDraws<R = StdRng> {
    rng: R,
}

impl RandomDraws<StdRng> {
    /// Seeded when `seed` is given, OS entropy otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl<R: Rng> RandomDraws<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send + Sync> Draws for RandomDraws<R> {
    fn visits_step(&mut self, upper: u64) -> u64 {
        if upper == 0 {
            return 0;
        }
        self.rng.gen_range(0..upper)
    }

    fn delta(&mut self, spread: f64) -> f64 {
        if !spread.is_finite() || spread <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-spread..spread)
    }

    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

#[cfg(test)]
pub mod testing {
    use super::Draws;
    use std::collections::VecDeque;

    /// Replays queued values; an exhausted queue yields zero
    #[derive(Debug, Default)]
    pub struct ScriptedDraws {
        pub steps: VecDeque<u64>,
        pub deltas: VecDeque<f64>,
        pub indices: VecDeque<usize>,
    }

    impl ScriptedDraws {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_steps(mut self, steps: &[u64]) -> Self {
            self.steps.extend(steps);
            self
        }

        pub fn with_deltas(mut self, deltas: &[f64]) -> Self {
            self.deltas.extend(deltas);
            self
        }

        pub fn with_indices(mut self, indices: &[usize]) -> Self {
            self.indices.extend(indices);
            self
        }
    }

    impl Draws for ScriptedDraws {
        fn visits_step(&mut self, _upper: u64) -> u64 {
            self.steps.pop_front().unwrap_or(0)
        }

        fn delta(&mut self, _spread: f64) -> f64 {
            self.deltas.pop_front().unwrap_or(0.0)
        }

        fn index(&mut self, _len: usize) -> usize {
            self.indices.pop_front().unwrap_or(0)
        }
    }
}
