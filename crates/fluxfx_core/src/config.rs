//! Engine tuning.
//!
//! Loaded once at startup (usually from the `[engine]` table of the host
//! settings file). Every field has a default, so a partial table is valid.

use serde::{Deserialize, Serialize};

/// Default pool capacity.
pub const MAX_PARTICLES: usize = 200;

/// Tunables read by the effect engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum live particles.
    pub max_particles: usize,
    /// Minimum gap between accepted pointer-down/move events (ms).
    pub input_debounce_ms: u64,
    /// Period of ambient replenishment (ms).
    pub ambient_interval_ms: u64,
    /// Particles added per ambient replenishment.
    pub ambient_batch: usize,
    /// Initial population of the ambient field modes.
    pub ambient_population: usize,
    /// Recursion depth of the lightning path generator.
    pub lightning_depth: u32,
    /// Particles placed along each lightning bolt.
    pub lightning_samples: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_particles: MAX_PARTICLES,
            input_debounce_ms: 50,
            ambient_interval_ms: 100,
            ambient_batch: 5,
            ambient_population: 50,
            lightning_depth: 8,
            lightning_samples: 20,
        }
    }
}
