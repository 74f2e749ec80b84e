//! Random sources for coin-toss modes.

use rmx_types::MAX_PROBABILITY;

/// Uniform integer draws in `[0, 100)`.
pub trait RandomSource {
    fn draw(&mut self) -> u8;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn draw(&mut self) -> u8 {
        (**self).draw()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn draw(&mut self) -> u8 {
        (**self).draw()
    }
}

/// 64-bit linear congruential generator (MMIX multiplier and increment),
/// high bits taken with `>> 33`.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u31(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 33) as u32
    }
}

impl RandomSource for Lcg {
    fn draw(&mut self) -> u8 {
        // Multiply-shift keeps the 31-bit output uniform over the range
        ((self.next_u31() as u64 * MAX_PROBABILITY as u64) >> 31) as u8
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted. Values above 99
/// are clamped; an empty script always draws 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: Vec<u8>,
    pos: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<u8>>) -> Self {
        Self {
            values: values.into(),
            pos: 0,
        }
    }

    /// Always draws `value`.
    pub fn constant(value: u8) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ScriptedRandom {
    fn draw(&mut self) -> u8 {
        if self.values.is_empty() {
            self.pos += 1;
            return 0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v.min(MAX_PROBABILITY - 1)
    }
}
