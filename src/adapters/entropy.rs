//! Entropy adapter for the simulated position walk.
//!
//! Seeds a small PRNG once at construction — from the hardware RNG on the
//! ESP-IDF target, from the system clock on the host. The walk only needs
//! uniformly spread bearings, not cryptographic quality.

use core::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::app::ports::EntropyPort;

/// PRNG-backed bearing source.
pub struct EntropyAdapter {
    rng: SmallRng,
}

impl EntropyAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new() -> Self {
        let hi = unsafe { esp_idf_svc::sys::esp_random() } as u64;
        let lo = unsafe { esp_idf_svc::sys::esp_random() } as u64;
        Self {
            rng: SmallRng::seed_from_u64((hi << 32) | lo),
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5eed);
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Fixed-seed constructor for reproducible simulation runs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropyAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropyPort for EntropyAdapter {
    fn next_bearing(&mut self) -> f64 {
        self.rng.gen_range(0.0..TAU)
    }
}
