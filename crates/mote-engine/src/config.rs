//! Engine configuration and validation.
//!
//! [`EngineConfig`] is the constructor input for [`Engine`](crate::Engine).
//! [`validate()`](EngineConfig::validate) checks structural invariants
//! up front; construction is the only fallible operation in the
//! engine's lifecycle.

use mote_core::layout::MAX_PARTICLES;
use mote_core::ConfigError;

/// Complete configuration for constructing a simulation engine.
///
/// World bounds match the caller's display surface and are immutable
/// afterwards; if the surface resizes, construct a new engine. The
/// seed drives all pseudo-randomness (initial placement and per-step
/// jitter), so two engines built from equal configs evolve
/// bit-identically under the same pointer and mode script.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// World width in display units.
    pub width: f32,
    /// World height in display units.
    pub height: f32,
    /// Number of particles. Fixed for the engine's lifetime.
    pub count: usize,
    /// RNG seed for deterministic simulation.
    pub seed: u64,
}

impl EngineConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. At least one particle.
        if self.count == 0 {
            return Err(ConfigError::ZeroParticles);
        }
        // 2. Count under the construction-time ceiling.
        if self.count > MAX_PARTICLES {
            return Err(ConfigError::TooManyParticles {
                requested: self.count,
                max: MAX_PARTICLES,
            });
        }
        // 3. Bounds finite and positive. Subnormal extents are rejected
        //    too: 1.0 / extent must stay finite for the wrap arithmetic.
        for extent in [self.width, self.height] {
            if !extent.is_finite() || extent <= 0.0 || !(1.0 / extent).is_finite() {
                return Err(ConfigError::InvalidWorldBounds {
                    width: self.width,
                    height: self.height,
                });
            }
        }
        Ok(())
    }
}
