//! Random value generation behind a swappable source.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest value a rounded result may take.
pub const MAX_VALUE: f64 = 0.999_999;

const SCALE: f64 = 1_000_000.0;

/// Source of uniform values in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_f64(&self) -> f64;
}

/// Rounds a raw sample to six fractional digits, staying inside `[0, 1)`.
pub fn round_value(raw: f64) -> f64 {
    let rounded = (raw * SCALE).round() / SCALE;
    rounded.clamp(0.0, MAX_VALUE)
}

/// Production source: a `StdRng` seeded from the thread RNG.
pub struct ThreadRandom {
    inner: Mutex<StdRng>,
}

impl ThreadRandom {
    pub fn new() -> Self {
        let seed = rand::thread_rng().gen::<[u8; 32]>();
        Self { inner: Mutex::new(StdRng::from_seed(seed)) }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn next_f64(&self) -> f64 {
        let mut rng = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen::<f64>()
    }
}

/// Deterministic source that cycles through a fixed list of values.
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<f64>,
    index: AtomicUsize,
}

impl SequenceRandom {
    /// Creates a source over `values`; an empty list always yields `0.0`.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: AtomicUsize::new(0) }
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        self.values[i % self.values.len()]
    }
}
