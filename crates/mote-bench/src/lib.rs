//! Benchmark profiles for the Mote particle simulation engine.
//!
//! Pre-built engine configurations at the population sizes the frame
//! budget is specified against:
//!
//! - [`standard_profile`]: 7 000 particles, the O(N) ceiling
//! - [`galaxy_profile`]: 1 000 particles, the O(N²) mode cap
//! - [`entangle_profile`]: 7 000 particles of independent pairs

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use mote_core::Mode;
use mote_engine::{Engine, EngineConfig};

/// Viewport the profiles simulate against, a common desktop surface.
pub const PROFILE_WIDTH: f32 = 1920.0;

/// Viewport height counterpart of [`PROFILE_WIDTH`].
pub const PROFILE_HEIGHT: f32 = 1080.0;

fn profile(count: usize, seed: u64, mode: Mode) -> Engine {
    let mut engine = Engine::new(EngineConfig {
        width: PROFILE_WIDTH,
        height: PROFILE_HEIGHT,
        count,
        seed,
    })
    .expect("profile config is valid");
    engine
        .set_mode(mode.id())
        .expect("profile population fits the mode cap");
    engine
}

/// Standard-mode engine at the 7 000 particle interactive target.
pub fn standard_profile(seed: u64) -> Engine {
    profile(7_000, seed, Mode::Standard)
}

/// Galaxy-mode engine at the mode's 1 000 particle cap.
///
/// The cap is the knob that keeps the deliberate O(N²) force sum
/// inside the frame budget; benchmarking at the cap measures the
/// worst case the engine will ever run.
pub fn galaxy_profile(seed: u64) -> Engine {
    let cap = Mode::Galaxy
        .max_particles()
        .expect("galaxy mode is capped");
    profile(cap, seed, Mode::Galaxy)
}

/// Entangle-mode engine at the 7 000 particle interactive target.
pub fn entangle_profile(seed: u64) -> Engine {
    profile(7_000, seed, Mode::Entangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mote_core::STRIDE;

    #[test]
    fn profiles_construct_and_step() {
        for mut engine in [
            standard_profile(1),
            galaxy_profile(1),
            entangle_profile(1),
        ] {
            let count = engine.particle_count();
            let frame = engine.step(1);
            assert_eq!(frame.as_slice().len(), count * STRIDE);
        }
    }

    #[test]
    fn galaxy_profile_sits_at_the_cap() {
        let engine = galaxy_profile(1);
        assert_eq!(
            Some(engine.particle_count()),
            Mode::Galaxy.max_particles()
        );
    }
}
