use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::maze::Direction;

/// Uniform integer source the generators draw from.
///
/// Both carving algorithms only ever ask for integers, so a fixed sequence of answers
/// reproduces a maze exactly.
pub trait RandomSource {
    /// Returns an integer in `[low, high)`. Panics if the range is empty.
    fn uniform_int(&mut self, low: usize, high: usize) -> usize;

    /// Draws one of the four directions, indexed 0 = north .. 3 = west.
    ///
    /// # Panics
    /// If `uniform_int` answers outside the range it was asked for.
    fn direction(&mut self) -> Direction {
        let index = self.uniform_int(0, Direction::ALL.len());
        Direction::from_index(index)
            .unwrap_or_else(|| panic!("direction draw {} outside [0, 4)", index))
    }
}

/// Adapts any `rand` generator to [`RandomSource`].
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource(rng)
    }
}

impl RngSource<StdRng> {
    /// A random source, seeded for reproducibility when `seed` is given.
    pub fn seeded(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        RngSource(rng)
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform_int(&mut self, low: usize, high: usize) -> usize {
        self.0.random_range(low..high)
    }
}

/// Replays a fixed list of draws. Used to pin generators to hand-checked traces.
#[cfg(test)]
pub(crate) struct ScriptedRandom {
    draws: std::collections::VecDeque<usize>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(draws: &[usize]) -> Self {
        ScriptedRandom {
            draws: draws.iter().copied().collect(),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.draws.len()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn uniform_int(&mut self, low: usize, high: usize) -> usize {
        let value = self.draws.pop_front().expect("script ran out of draws");
        assert!(
            (low..high).contains(&value),
            "scripted draw {} outside [{}, {})",
            value,
            low,
            high
        );
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = RngSource::seeded(Some(42));
        let mut b = RngSource::seeded(Some(42));
        let xs = (0..32).map(|_| a.uniform_int(0, 100)).collect::<Vec<_>>();
        let ys = (0..32).map(|_| b.uniform_int(0, 100)).collect::<Vec<_>>();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&x| x < 100));
    }

    #[test]
    fn test_direction_follows_index() {
        let mut script = ScriptedRandom::new(&[0, 1, 2, 3]);
        assert_eq!(script.direction(), Direction::North);
        assert_eq!(script.direction(), Direction::East);
        assert_eq!(script.direction(), Direction::South);
        assert_eq!(script.direction(), Direction::West);
        assert_eq!(script.remaining(), 0);
    }

    struct Stuck(usize);

    impl RandomSource for Stuck {
        fn uniform_int(&mut self, _low: usize, _high: usize) -> usize {
            self.0
        }
    }

    #[test]
    #[should_panic(expected = "direction draw 7 outside [0, 4)")]
    fn test_out_of_range_direction_panics() {
        Stuck(7).direction();
    }

    #[test]
    fn test_direction_from_custom_source() {
        assert_eq!(Stuck(2).direction(), Direction::South);
    }

    #[test]
    #[should_panic(expected = "outside [0, 4)")]
    fn test_script_checks_range() {
        let mut script = ScriptedRandom::new(&[4]);
        script.direction();
    }
}
