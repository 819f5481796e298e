//!
//! knox-std-random - Random Number Generation
//!
//! Provides bounded random numbers for knox programs. All draws go through a
//! `KnoxRng` handle, which can be seeded for reproducible output or seeded
//! from OS entropy.
//!
//! ## Functions
//!
//! - `random(min: int, max: int) -> int` - Random integer in range [min, max]
//! - `randomf(min: float, max: float) -> float` - Random f32 in range [min, max)
//! - `randomd(min: double, max: double) -> double` - Random f64 in range [min, max)
//!
//! ## Thread Safety
//!
//! The C exports use a thread-local handle, so every thread draws from its own
//! stream. `knox_random_seed` reseeds only the calling thread's stream. Threads
//! that never call it start from the seed in `RuntimeConfig::from_env`, which
//! means every thread produces the same sequence when `KNOX_SEED` is set.
//!

use std::cell::RefCell;
use std::ffi::c_int;

use knox_std_core::{KnoxError, RandomConfig, Result, RuntimeConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A random generator handle.
#[derive(Debug, Clone)]
pub struct KnoxRng {
    rng: StdRng,
}

impl KnoxRng {
    /// Generator with a fixed seed; equal seeds give equal sequences.
    pub fn seeded(seed: u64) -> Self {
        tracing::trace!(seed, "seeding generator");
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn from_config(config: &RandomConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        *self = Self::seeded(seed);
    }

    /// Random integer in the inclusive range [min, max].
    pub fn random_int(&mut self, min: i64, max: i64) -> Result<i64> {
        if min > max {
            tracing::debug!(min, max, "rejected integer range");
            return Err(KnoxError::invalid_range(min, max));
        }
        Ok(self.rng.random_range(min..=max))
    }

    /// Random f32 in [min, max). Returns `min` when `min == max`.
    pub fn random_float(&mut self, min: f32, max: f32) -> Result<f32> {
        check_float_range(min, max, f32::is_finite)?;
        let fraction: f32 = self.rng.random();
        Ok(scale_f32(min, max, fraction))
    }

    /// Random f64 in [min, max). Returns `min` when `min == max`.
    pub fn random_double(&mut self, min: f64, max: f64) -> Result<f64> {
        check_float_range(min, max, f64::is_finite)?;
        let fraction: f64 = self.rng.random();
        Ok(scale_f64(min, max, fraction))
    }
}

fn check_float_range<T>(min: T, max: T, is_finite: fn(T) -> bool) -> Result<()>
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    if !is_finite(min) || !is_finite(max) || min > max {
        tracing::debug!(%min, %max, "rejected float range");
        return Err(KnoxError::invalid_range(min, max));
    }
    Ok(())
}

macro_rules! float_scaling {
    ($scale:ident, $below:ident, $t:ty) => {
        /// Map `fraction` in [0, 1) onto [min, max), keeping the upper bound
        /// exclusive after rounding.
        fn $scale(min: $t, max: $t, fraction: $t) -> $t {
            let span = max - min;
            let value = if span.is_finite() {
                min + fraction * span
            } else {
                min - fraction * min + fraction * max
            };
            if max > min && value >= max {
                $below(max).max(min)
            } else {
                value.max(min)
            }
        }

        /// Largest value strictly below `x`.
        fn $below(x: $t) -> $t {
            if x.is_nan() || x == <$t>::NEG_INFINITY {
                return x;
            }
            if x == 0.0 {
                return -<$t>::from_bits(1);
            }
            let bits = x.to_bits();
            if x > 0.0 {
                <$t>::from_bits(bits - 1)
            } else {
                <$t>::from_bits(bits + 1)
            }
        }
    };
}

float_scaling!(scale_f32, below_f32, f32);
float_scaling!(scale_f64, below_f64, f64);

thread_local! {
    static THREAD_RNG: RefCell<Option<KnoxRng>> = const { RefCell::new(None) };
}

fn default_rng() -> KnoxRng {
    match RuntimeConfig::from_env() {
        Ok(config) => KnoxRng::from_config(&config.random),
        Err(err) => {
            tracing::warn!(%err, "ignoring runtime config, seeding from entropy");
            KnoxRng::from_entropy()
        }
    }
}

/// Run `f` with the calling thread's generator, creating it on first use.
pub fn with_thread_rng<R>(f: impl FnOnce(&mut KnoxRng) -> R) -> R {
    THREAD_RNG.with(|cell| {
        let mut slot = cell.borrow_mut();
        f(slot.get_or_insert_with(default_rng))
    })
}

/// Random integer in [min, max]. Returns `min` if `min >= max`.
#[unsafe(no_mangle)]
pub extern "C" fn knox_random(min: c_int, max: c_int) -> c_int {
    if min >= max {
        return min;
    }
    with_thread_rng(|rng| rng.random_int(min.into(), max.into()))
        .ok()
        .and_then(|v| c_int::try_from(v).ok())
        .unwrap_or(min)
}

/// Random float in [min, max). Returns `min` for empty or non-finite ranges.
#[unsafe(no_mangle)]
pub extern "C" fn knox_randomf(min: f32, max: f32) -> f32 {
    with_thread_rng(|rng| rng.random_float(min, max)).unwrap_or(min)
}

/// Random double in [min, max). Returns `min` for empty or non-finite ranges.
#[unsafe(no_mangle)]
pub extern "C" fn knox_randomd(min: f64, max: f64) -> f64 {
    with_thread_rng(|rng| rng.random_double(min, max)).unwrap_or(min)
}

/// Reseed the calling thread's generator.
#[unsafe(no_mangle)]
pub extern "C" fn knox_random_seed(seed: u64) {
    with_thread_rng(|rng| rng.reseed(seed));
}
