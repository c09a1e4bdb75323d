//! Injectable randomness.
//!
//! Every resolver takes a [`RandomSource`] explicitly. Production code wraps
//! a [`rand::Rng`] in [`RngDice`]; tests replay exact draw sequences with
//! [`ScriptedDice`].

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A source of uniform random draws.
///
/// `Send` so that async tick futures holding a source stay `Send`.
pub trait RandomSource: Send {
    /// A uniform sample in `[0, 1)`.
    fn roll(&mut self) -> f64;

    /// A uniform integer in `[0, n)`. Returns 0 when `n` is 0.
    fn below(&mut self, n: usize) -> usize;

    /// Draw once and report whether the sample fell under `probability`.
    fn chance(&mut self, probability: f64) -> bool {
        self.roll() < probability
    }

    /// Pick one element uniformly. `None` for an empty slice, without
    /// consuming a draw.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        items.get(self.below(items.len()))
    }
}

/// A [`RandomSource`] backed by any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    /// The wrapped generator.
    rng: R,
}

impl<R: Rng + Send> RngDice<R> {
    /// Wrap a generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<SmallRng> {
    /// A fast generator seeded from the operating system.
    pub fn from_os() -> Self {
        Self::new(SmallRng::from_os_rng())
    }

    /// A fast generator with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> RandomSource for RngDice<R> {
    fn roll(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.random_range(0..n)
    }
}

/// Replays a fixed list of rolls, for exact scenario tests.
///
/// Integer draws consume one roll and map it to `floor(roll * n)`. Once the
/// script runs out every draw returns the fallback value.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    /// Remaining scripted rolls.
    rolls: VecDeque<f64>,
    /// Value returned after the script is exhausted.
    fallback: f64,
}

impl ScriptedDice {
    /// Script the given rolls; afterwards every draw returns 0.5.
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: 0.5,
        }
    }

    /// Replace the value returned once the script is exhausted.
    #[must_use]
    pub fn then_always(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// How many scripted rolls have not been consumed yet.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedDice {
    fn roll(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let roll = self.roll().clamp(0.0, 1.0);
        let index = (roll * n as f64).floor() as usize;
        index.min(n.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_rolls_replay_in_order_then_fall_back() {
        let mut dice = ScriptedDice::new([0.1, 0.9]).then_always(0.25);
        assert!((dice.roll() - 0.1).abs() < f64::EPSILON);
        assert!((dice.roll() - 0.9).abs() < f64::EPSILON);
        assert!((dice.roll() - 0.25).abs() < f64::EPSILON);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn scripted_integer_draws_floor_the_roll() {
        let mut dice = ScriptedDice::new([0.0, 0.49, 0.5, 0.999_999, 1.0]);
        assert_eq!(dice.below(2), 0);
        assert_eq!(dice.below(2), 0);
        assert_eq!(dice.below(2), 1);
        assert_eq!(dice.below(20), 19);
        assert_eq!(dice.below(20), 19);
    }

    #[test]
    fn pick_on_empty_slice_consumes_nothing() {
        let mut dice = ScriptedDice::new([0.7]);
        let empty: [u8; 0] = [];
        assert!(dice.pick(&empty).is_none());
        assert_eq!(dice.remaining(), 1);
        assert_eq!(dice.pick(&['a', 'b', 'c']), Some(&'c'));
    }

    #[test]
    fn rng_dice_stays_in_range() {
        let mut dice = RngDice::seeded(42);
        for _ in 0..1_000 {
            let r = dice.roll();
            assert!((0.0..1.0).contains(&r));
            assert!(dice.below(7) < 7);
        }
        assert_eq!(dice.below(0), 0);
    }
}
