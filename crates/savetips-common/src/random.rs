use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the coin flip used to pick the promotional tip.
pub trait RandomSource: Send + Sync {
    fn next_bool(&self) -> bool;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// ThreadRandom — uniform draw from the thread-local generator (default)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_bool(&self) -> bool {
        rand::thread_rng().gen_bool(0.5)
    }

    fn name(&self) -> &'static str {
        "thread"
    }
}

// ---------------------------------------------------------------------------
// SeededRandom — reproducible sequence for a fixed seed
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_bool(&self) -> bool {
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_bool(0.5)
    }

    fn name(&self) -> &'static str {
        "seeded"
    }
}

// ---------------------------------------------------------------------------
// FixedRandom — always the same answer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub bool);

impl RandomSource for FixedRandom {
    fn next_bool(&self) -> bool {
        self.0
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Pick the generator for an optional seed.
pub fn from_seed(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_random() {
        assert!(FixedRandom(true).next_bool());
        assert!(!FixedRandom(false).next_bool());
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        let seq_a: Vec<bool> = (0..32).map(|_| a.next_bool()).collect();
        let seq_b: Vec<bool> = (0..32).map(|_| b.next_bool()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_thread_random_produces_both_values() {
        let rng = ThreadRandom;
        let trues = (0..512).filter(|_| rng.next_bool()).count();
        assert!(trues > 0 && trues < 512);
    }

    #[test]
    fn test_from_seed() {
        assert_eq!(from_seed(Some(7)).name(), "seeded");
        assert_eq!(from_seed(None).name(), "thread");
    }
}
