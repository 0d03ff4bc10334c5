//! The simulation engine and its step loop.
//!
//! [`Engine`] owns all simulation state and advances it synchronously:
//! each [`step()`](Engine::step) call runs to completion, then the
//! returned [`Frame`] is valid to read. There is no internal
//! concurrency and no way to observe a partial update.
//!
//! # Step anatomy
//!
//! Every iteration runs two passes. The force pass computes all
//! accelerations from pre-step state into a scratch buffer; the
//! integrate pass then applies `v += a·dt`, `p += v·dt`, wraps
//! positions onto the torus, and damps velocities per mode. Splitting
//! the passes keeps pairwise forces exactly antisymmetric — particle
//! j never sees particle i's already-updated position.

use std::fmt;
use std::time::Instant;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use mote_core::{ConfigError, Mode, ModeError, TickId};

use crate::config::EngineConfig;
use crate::forces;
use crate::frame::Frame;
use crate::metrics::StepMetrics;
use crate::store::ParticleStore;

/// Fixed integration timestep: one world unit of time per iteration.
///
/// The engine does not do variable-timestep integration; callers that
/// want faster simulated time pass a higher iteration count to
/// [`Engine::step`] ("overclock").
pub const DT: f32 = 1.0;

/// Wrap a coordinate onto `[0, extent)`.
///
/// `rem_euclid` alone is not enough: for a tiny negative input it can
/// round up to `extent` itself, which would violate the half-open
/// bound the renderer relies on.
#[inline]
fn wrap(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// Synchronous 2D particle simulation engine.
///
/// Created from an [`EngineConfig`] via [`new()`](Engine::new). Owns
/// the particle store, the active [`Mode`], the pointer target, and
/// the acceleration scratch buffer. Not `Sync`: one engine instance
/// per caller, stepped from a single render loop.
///
/// # Example
///
/// ```
/// use mote_engine::{Engine, EngineConfig};
///
/// let mut engine = Engine::new(EngineConfig {
///     width: 1280.0,
///     height: 720.0,
///     count: 2_000,
///     seed: 42,
/// })
/// .unwrap();
///
/// engine.set_pointer(640.0, 360.0);
/// let frame = engine.step(1);
/// assert_eq!(frame.len(), 2_000);
/// ```
pub struct Engine {
    width: f32,
    height: f32,
    seed: u64,
    store: ParticleStore,
    accel: Vec<[f32; 2]>,
    pointer: (f32, f32),
    mode: Mode,
    tick: TickId,
    last_metrics: StepMetrics,
}

impl Engine {
    /// Construct an engine from a configuration.
    ///
    /// Validates the configuration, allocates the store and scratch
    /// buffers, and seeds the initial particle state. The pointer
    /// target starts at the world center; the mode starts at
    /// [`Mode::Standard`].
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            width: config.width,
            height: config.height,
            seed: config.seed,
            store: ParticleStore::new(&config),
            accel: vec![[0.0; 2]; config.count],
            pointer: (config.width / 2.0, config.height / 2.0),
            mode: Mode::default(),
            tick: TickId(0),
            last_metrics: StepMetrics::default(),
        })
    }

    /// Advance the simulation `iterations` steps and publish a frame.
    ///
    /// `iterations > 1` is the overclock path: the same fixed-dt step
    /// repeated, driven by the caller rather than by a change of force
    /// law. `step(0)` advances nothing and returns a view of the
    /// current state.
    ///
    /// The returned [`Frame`] borrows from `self`; the caller must
    /// drop it before stepping again, which is what guarantees the
    /// buffer always reflects exactly one completed step.
    pub fn step(&mut self, iterations: u32) -> Frame<'_> {
        let start = Instant::now();
        let mut force_us = 0u64;
        let mut integrate_us = 0u64;
        for _ in 0..iterations {
            let (f, g) = self.advance();
            force_us += f;
            integrate_us += g;
        }
        if iterations > 0 {
            self.last_metrics = StepMetrics {
                tick: self.tick.0,
                iterations,
                force_us,
                integrate_us,
                total_us: start.elapsed().as_micros() as u64,
            };
        }
        self.frame()
    }

    /// One iteration: force pass, then integrate pass.
    fn advance(&mut self) -> (u64, u64) {
        let force_start = Instant::now();
        match self.mode {
            Mode::Standard => {
                // Deterministic jitter stream: seeded from seed XOR tick.
                let mut rng = ChaCha8Rng::seed_from_u64(self.seed ^ self.tick.0);
                forces::fill_standard(&self.store, self.pointer, &mut rng, &mut self.accel);
            }
            Mode::Galaxy => forces::fill_galaxy(&self.store, &mut self.accel),
            Mode::Entangle => forces::fill_entangle(&self.store, &mut self.accel),
        }

        let integrate_start = Instant::now();
        let damping = self.mode.damping();
        for i in 0..self.store.len() {
            let [ax, ay] = self.accel[i];
            let (vx, vy) = self.store.velocity(i);
            let vx = vx + ax * DT;
            let vy = vy + ay * DT;
            let (x, y) = self.store.position(i);
            let x = wrap(x + vx * DT, self.width);
            let y = wrap(y + vy * DT, self.height);
            self.store.set_position(i, x, y);
            self.store.set_velocity(i, vx * damping, vy * damping);
        }
        self.tick = TickId(self.tick.0 + 1);

        let end = Instant::now();
        (
            (integrate_start - force_start).as_micros() as u64,
            (end - integrate_start).as_micros() as u64,
        )
    }

    /// Update the pointer target consumed by the next step.
    ///
    /// Non-finite coordinates are ignored, preserving the engine's
    /// no-NaN invariant against hosts that forward raw event data.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.pointer = (x, y);
        }
    }

    /// Select the force model by wire id, taking effect on the next step.
    ///
    /// Rejected requests ([`ModeError`]) leave the current mode
    /// unchanged: unknown ids, and modes whose particle cap is below
    /// this engine's count (galaxy's O(N²) capacity contract).
    pub fn set_mode(&mut self, id: i32) -> Result<(), ModeError> {
        let mode = Mode::from_id(id)?;
        if let Some(max) = mode.max_particles() {
            if self.store.len() > max {
                return Err(ModeError::TooManyParticles {
                    mode,
                    count: self.store.len(),
                    max,
                });
            }
        }
        self.mode = mode;
        Ok(())
    }

    /// Re-seed the particle population and rewind to tick 0.
    ///
    /// Bounds, count, mode, and pointer target are kept; the particle
    /// state is redrawn from `seed` exactly as construction would.
    pub fn reset(&mut self, seed: u64) {
        self.store.randomize(self.width, self.height, seed);
        self.seed = seed;
        self.tick = TickId(0);
        self.last_metrics = StepMetrics::default();
    }

    /// A read-only view of the current published state.
    pub fn frame(&self) -> Frame<'_> {
        Frame::new(self.store.as_slice(), self.tick)
    }

    /// The active force model.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Completed-step counter (0 after construction or reset).
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Number of particles. Immutable for the engine's lifetime.
    pub fn particle_count(&self) -> usize {
        self.store.len()
    }

    /// World width in display units.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// World height in display units.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// The current pointer target.
    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }

    /// The current simulation seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Metrics from the most recent state-advancing step call.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut ParticleStore {
        &mut self.store
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("count", &self.store.len())
            .field("mode", &self.mode)
            .field("tick", &self.tick)
            .field("seed", &self.seed)
            .finish()
    }
}
