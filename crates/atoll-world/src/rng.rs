//! Process-wide random source with one independent stream per worker thread.
//!
//! A single atomic counter is the shared reseed point. Every thread lazily builds
//! its own `ChaCha8Rng` from the next counter value, so no generator instance is
//! ever shared between threads. Reseeding bumps an epoch; threads notice the new
//! epoch on their next draw and derive a fresh stream.

use std::cell::RefCell;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

static SEED: LazyLock<AtomicU64> = LazyLock::new(|| AtomicU64::new(rand::random()));
static EPOCH: AtomicU64 = AtomicU64::new(0);

struct WorkerStream {
    epoch: u64,
    rng: ChaCha8Rng,
}

impl WorkerStream {
    fn claim(epoch: u64) -> Self {
        let seed = SEED.fetch_add(1, Ordering::AcqRel).wrapping_add(1);
        Self {
            epoch,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

thread_local! {
    static STREAM: RefCell<Option<WorkerStream>> = const { RefCell::new(None) };
}

/// Resets the shared counter. Every thread derives a new stream on its next draw.
pub fn reseed(seed: u64) {
    SEED.store(seed, Ordering::Release);
    EPOCH.fetch_add(1, Ordering::AcqRel);
    log::info!(target: "mapgen", "random source reseeded with {}", seed);
}

/// Runs `f` with this thread's stream, creating or refreshing it first if needed.
pub fn with_stream<R>(f: impl FnOnce(&mut ChaCha8Rng) -> R) -> R {
    STREAM.with(|cell| {
        let mut slot = cell.borrow_mut();
        let epoch = EPOCH.load(Ordering::Acquire);
        let stream = match slot.take() {
            Some(s) if s.epoch == epoch => s,
            _ => WorkerStream::claim(epoch),
        };
        let stream = slot.insert(stream);
        f(&mut stream.rng)
    })
}

/// Uniform value in `[0, 1)`.
pub fn next_double() -> f64 {
    with_stream(|rng| rng.gen_range(0.0..1.0))
}

/// Uniform integer in `[min, max)`; returns `min` when the range is empty.
pub fn next_int(min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    with_stream(|rng| rng.gen_range(min..max))
}

/// Uniform value in `[min, max)`; returns `min` when the range is empty.
pub fn next_range_f64(min: f64, max: f64) -> f64 {
    if !(min.is_finite() && max.is_finite() && max > min) {
        return min;
    }
    with_stream(|rng| rng.gen_range(min..max))
}
