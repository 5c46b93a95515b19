//! Policies choosing the next attack.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses which registered attack runs next.
pub trait AttackSelector: Send + Sync {
    /// Returns an index in `0..attack_count`. `phase` is the current
    /// difficulty phase and `attack_count` is never zero.
    fn select(&mut self, attack_count: usize, phase: u8) -> usize;
}

/// Uniform random choice, optionally never picking the same attack twice in
/// a row.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
    avoid_repeat: bool,
    last: Option<usize>,
}

impl RandomSelector {
    /// Creates a selector seeded for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64, avoid_repeat: bool) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            avoid_repeat,
            last: None,
        }
    }
}

impl AttackSelector for RandomSelector {
    fn select(&mut self, attack_count: usize, _phase: u8) -> usize {
        let choice = match self.last {
            Some(previous) if self.avoid_repeat && attack_count > 1 => {
                let pick = self.rng.random_range(0..attack_count - 1);
                if pick >= previous {
                    pick + 1
                } else {
                    pick
                }
            }
            _ => self.rng.random_range(0..attack_count),
        };
        self.last = Some(choice);
        choice
    }
}

/// Walks a fixed table of attack indices, wrapping at the end.
#[derive(Debug, Clone)]
pub struct PatternSelector {
    order: Vec<usize>,
    cursor: usize,
}

impl PatternSelector {
    /// Creates a selector over `order`. An empty table always yields `0`.
    #[must_use]
    pub const fn new(order: Vec<usize>) -> Self {
        Self { order, cursor: 0 }
    }
}

impl AttackSelector for PatternSelector {
    fn select(&mut self, _attack_count: usize, _phase: u8) -> usize {
        let Some(&choice) = self.order.get(self.cursor) else {
            self.cursor = 0;
            return self.order.first().copied().unwrap_or(0);
        };
        self.cursor = (self.cursor + 1) % self.order.len();
        choice
    }
}
