use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Player;

/// Picks which player opens a fresh session.
pub trait CoinFlip {
    fn flip(&mut self) -> Player;
}

/// A fair coin backed by `StdRng`. Seed it for reproducible games.
pub struct RandomCoin {
    rng: StdRng,
}

impl RandomCoin {
    pub fn new() -> Self {
        RandomCoin {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomCoin {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomCoin {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinFlip for RandomCoin {
    fn flip(&mut self) -> Player {
        if self.rng.random_bool(0.5) {
            Player::Two
        } else {
            Player::One
        }
    }
}

/// A coin that always lands on the same player.
#[derive(Debug, Clone, Copy)]
pub struct FixedCoin(pub Player);

impl CoinFlip for FixedCoin {
    fn flip(&mut self) -> Player {
        self.0
    }
}
