//! Play-order assignment for the non-creator players of a new game.

use std::fmt::Debug;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Rearranges player ids in place into play order.
pub trait PlayerOrder: Send + Sync + Debug {
    fn arrange(&self, players: &mut [i64]);
}

/// Uniformly random permutation from the thread RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomOrder;

impl PlayerOrder for RandomOrder {
    fn arrange(&self, players: &mut [i64]) {
        players.shuffle(&mut rand::rng());
    }
}

/// Reproducible permutation: the same seed and input always yield the same order.
#[derive(Debug, Clone, Copy)]
pub struct SeededOrder {
    seed: u64,
}

impl SeededOrder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl PlayerOrder for SeededOrder {
    fn arrange(&self, players: &mut [i64]) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        players.shuffle(&mut rng);
    }
}

/// Keeps the caller's order.
#[derive(Debug, Default, Clone, Copy)]
pub struct GivenOrder;

impl PlayerOrder for GivenOrder {
    fn arrange(&self, _players: &mut [i64]) {}
}
