//! Injectable randomness for maze generation and cave seeding.
//!
//! Generators never reach for a global generator: the caller owns a `RandomSource` and hands it
//! in, so a fixed seed (or a scripted source) reproduces a maze or cave exactly.

use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

pub trait RandomSource {
    /// A biased coin flip: `true` with a `percent` in 100 chance.
    /// 0 is never true, 100 or more is always true.
    fn next_bool(&mut self, percent: u32) -> bool;
}

impl<'a, T: RandomSource + ?Sized> RandomSource for &'a mut T {
    fn next_bool(&mut self, percent: u32) -> bool {
        (**self).next_bool(percent)
    }
}

/// A `RandomSource` backed by any `rand` generator, by default the fast non-cryptographic
/// XorShift generator.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng = XorShiftRng> {
    rng: R,
}

impl RngSource<XorShiftRng> {
    /// Same seed, same sequence of draws.
    pub fn from_seed(seed: u64) -> RngSource<XorShiftRng> {
        RngSource { rng: XorShiftRng::seed_from_u64(seed) }
    }

    /// Seeded once from system entropy.
    pub fn from_entropy() -> RngSource<XorShiftRng> {
        RngSource { rng: XorShiftRng::from_entropy() }
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> RngSource<R> {
        RngSource { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    #[inline]
    fn next_bool(&mut self, percent: u32) -> bool {
        self.rng.gen_range(0..100) < percent
    }
}

/// Replays a fixed sequence of outcomes, ignoring the requested bias, and starts over at the
/// end. An empty script always answers `false`.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<bool>,
    position: usize,
}

impl ScriptedSource {
    pub fn new(script: Vec<bool>) -> ScriptedSource {
        ScriptedSource { script, position: 0 }
    }

    pub fn always(outcome: bool) -> ScriptedSource {
        ScriptedSource::new(vec![outcome])
    }
}

impl RandomSource for ScriptedSource {
    fn next_bool(&mut self, _: u32) -> bool {
        if self.script.is_empty() {
            return false;
        }
        let outcome = self.script[self.position];
        self.position = (self.position + 1) % self.script.len();
        outcome
    }
}
