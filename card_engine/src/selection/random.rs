//! Random sources for question draws.

use uuid::Uuid;

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Draw an index uniformly from `0..bound`.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `bound` is zero. `select_next` only draws
    /// from non-empty candidate sets.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// Draws from the operating system's entropy pool by way of v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyRandom;

impl EntropyRandom {
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for EntropyRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "cannot draw from an empty range");
        // The low 62 bits of a v4 UUID are random; version and variant bits sit above them.
        let bits = (Uuid::new_v4().as_u128() as u64) & (u64::MAX >> 2);
        (bits % bound as u64) as usize
    }
}

/// Replays a fixed list of draws, cycling when it runs out.
///
/// Each draw is reduced modulo the requested bound.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    draws: Vec<usize>,
    position: usize,
}

impl SequenceRandom {
    pub fn new(draws: impl IntoIterator<Item = usize>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            position: 0,
        }
    }

    /// Number of draws taken so far.
    pub fn draws_taken(&self) -> usize {
        self.position
    }
}

impl RandomSource for SequenceRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "cannot draw from an empty range");
        if self.draws.is_empty() {
            self.position += 1;
            return 0;
        }
        let draw = self.draws[self.position % self.draws.len()];
        self.position += 1;
        draw % bound
    }
}
