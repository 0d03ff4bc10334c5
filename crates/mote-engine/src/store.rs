//! Contiguous particle state storage.
//!
//! [`ParticleStore`] owns the single flat `f32` buffer holding every
//! particle's `[x, y, vx, vy, aux]` quintet. The buffer doubles as the
//! interop surface: after a step completes, the renderer reads it in
//! place through a [`Frame`](crate::Frame), no copy involved.
//!
//! Particle identity is the store index; the population is fixed at
//! construction, so indices are stable for the engine's lifetime.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use mote_core::layout::{SLOT_AUX, SLOT_VX, SLOT_VY, SLOT_X, SLOT_Y, STRIDE};

use crate::config::EngineConfig;

/// Smallest initial mass. Masses are drawn uniform in
/// `[MASS_MIN, MASS_MIN + MASS_SPAN)`.
pub const MASS_MIN: f32 = 0.5;

/// Width of the initial mass distribution.
pub const MASS_SPAN: f32 = 2.0;

/// Half-range of the initial per-axis velocity, in units per step.
pub const INITIAL_SPEED: f32 = 1.0;

/// Fixed-population particle state in a single flat allocation.
pub struct ParticleStore {
    data: Vec<f32>,
    count: usize,
}

impl ParticleStore {
    /// Allocate and seed a store from a validated configuration.
    ///
    /// Positions are uniform over `[0, width) x [0, height)`, per-axis
    /// velocities uniform over `[-INITIAL_SPEED, INITIAL_SPEED)`, and
    /// the aux slot holds the particle's mass. All draws come from a
    /// ChaCha8 stream seeded with `config.seed`, so equal configs
    /// produce bit-identical stores.
    pub(crate) fn new(config: &EngineConfig) -> Self {
        let mut store = Self {
            data: vec![0.0; config.count * STRIDE],
            count: config.count,
        };
        store.randomize(config.width, config.height, config.seed);
        store
    }

    /// Re-seed every particle in place from a fresh RNG stream.
    pub(crate) fn randomize(&mut self, width: f32, height: f32, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for i in 0..self.count {
            let base = i * STRIDE;
            self.data[base + SLOT_X] = rng.random::<f32>() * width;
            self.data[base + SLOT_Y] = rng.random::<f32>() * height;
            self.data[base + SLOT_VX] = (rng.random::<f32>() * 2.0 - 1.0) * INITIAL_SPEED;
            self.data[base + SLOT_VY] = (rng.random::<f32>() * 2.0 - 1.0) * INITIAL_SPEED;
            self.data[base + SLOT_AUX] = MASS_MIN + rng.random::<f32>() * MASS_SPAN;
        }
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the store holds no particles. Never true for a store
    /// built through a validated config.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The full flat buffer, `len() * STRIDE` values, particle-major.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    fn base(&self, index: usize) -> usize {
        debug_assert!(index < self.count);
        index * STRIDE
    }

    /// Position of particle `index`.
    #[inline]
    pub fn position(&self, index: usize) -> (f32, f32) {
        let base = self.base(index);
        (self.data[base + SLOT_X], self.data[base + SLOT_Y])
    }

    /// Velocity of particle `index`.
    #[inline]
    pub fn velocity(&self, index: usize) -> (f32, f32) {
        let base = self.base(index);
        (self.data[base + SLOT_VX], self.data[base + SLOT_VY])
    }

    /// Auxiliary scalar (mass) of particle `index`.
    #[inline]
    pub fn aux(&self, index: usize) -> f32 {
        self.data[self.base(index) + SLOT_AUX]
    }

    #[inline]
    pub(crate) fn set_position(&mut self, index: usize, x: f32, y: f32) {
        let base = self.base(index);
        self.data[base + SLOT_X] = x;
        self.data[base + SLOT_Y] = y;
    }

    #[inline]
    pub(crate) fn set_velocity(&mut self, index: usize, vx: f32, vy: f32) {
        let base = self.base(index);
        self.data[base + SLOT_VX] = vx;
        self.data[base + SLOT_VY] = vy;
    }

    #[cfg(test)]
    pub(crate) fn set_aux(&mut self, index: usize, aux: f32) {
        let base = self.base(index);
        self.data[base + SLOT_AUX] = aux;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config(count: usize, seed: u64) -> EngineConfig {
        EngineConfig {
            width: 800.0,
            height: 600.0,
            count,
            seed,
        }
    }

    #[test]
    fn new_allocates_exact_layout() {
        let store = ParticleStore::new(&config(7, 1));
        assert_eq!(store.len(), 7);
        assert!(!store.is_empty());
        assert_eq!(store.as_slice().len(), 7 * STRIDE);
    }

    #[test]
    fn initial_positions_are_in_bounds() {
        let store = ParticleStore::new(&config(200, 9));
        for i in 0..store.len() {
            let (x, y) = store.position(i);
            assert!((0.0..800.0).contains(&x), "x {x} out of bounds");
            assert!((0.0..600.0).contains(&y), "y {y} out of bounds");
        }
    }

    #[test]
    fn initial_velocities_are_bounded() {
        let store = ParticleStore::new(&config(200, 9));
        for i in 0..store.len() {
            let (vx, vy) = store.velocity(i);
            assert!(vx.abs() <= INITIAL_SPEED);
            assert!(vy.abs() <= INITIAL_SPEED);
        }
    }

    #[test]
    fn initial_masses_are_in_range() {
        let store = ParticleStore::new(&config(200, 9));
        for i in 0..store.len() {
            let m = store.aux(i);
            assert!((MASS_MIN..MASS_MIN + MASS_SPAN).contains(&m), "mass {m}");
        }
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let a = ParticleStore::new(&config(64, 1234));
        let b = ParticleStore::new(&config(64, 1234));
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn different_seeds_differ() {
        let a = ParticleStore::new(&config(64, 1));
        let b = ParticleStore::new(&config(64, 2));
        assert_ne!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn accessors_match_flat_layout() {
        let store = ParticleStore::new(&config(3, 7));
        let flat = store.as_slice();
        for i in 0..3 {
            let (x, y) = store.position(i);
            let (vx, vy) = store.velocity(i);
            assert_eq!(x, flat[i * STRIDE + SLOT_X]);
            assert_eq!(y, flat[i * STRIDE + SLOT_Y]);
            assert_eq!(vx, flat[i * STRIDE + SLOT_VX]);
            assert_eq!(vy, flat[i * STRIDE + SLOT_VY]);
            assert_eq!(store.aux(i), flat[i * STRIDE + SLOT_AUX]);
        }
    }

    #[test]
    fn randomize_replaces_state() {
        let mut store = ParticleStore::new(&config(32, 5));
        let before = store.as_slice().to_vec();
        store.randomize(800.0, 600.0, 6);
        assert_ne!(store.as_slice(), before.as_slice());
    }

    proptest! {
        /// Any valid (count, seed) pair yields fully finite, in-bounds state.
        #[test]
        fn initialization_is_finite_and_bounded(
            count in 1usize..512,
            seed in any::<u64>(),
        ) {
            let store = ParticleStore::new(&config(count, seed));
            prop_assert_eq!(store.len(), count);
            for &v in store.as_slice() {
                prop_assert!(v.is_finite());
            }
            for i in 0..count {
                let (x, y) = store.position(i);
                prop_assert!((0.0..800.0).contains(&x));
                prop_assert!((0.0..600.0).contains(&y));
            }
        }
    }
}
