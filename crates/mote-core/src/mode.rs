//! The force-model selector.

use std::fmt;

use crate::error::ModeError;

/// Force model applied by the step function.
///
/// The discriminant values are the wire ids accepted from external
/// callers (`set_mode`) and are ABI-stable. The speed multiplier
/// ("overclock") is deliberately not a mode: it is the `iterations`
/// argument of the step call, so the engine's force law stays a pure
/// function of this enumeration.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Pointer attraction with jitter; the idle/default model.
    #[default]
    Standard = 0,
    /// Full pairwise N-body gravity. O(N²) per step by design, with a
    /// hard particle cap to stay interactive; see [`Mode::max_particles`].
    Galaxy = 1,
    /// Index-paired spring binding: particle 2k bonds with 2k+1.
    Entangle = 2,
}

/// Every mode, in wire-id order. Handy for exhaustive tests.
pub const ALL_MODES: [Mode; 3] = [Mode::Standard, Mode::Galaxy, Mode::Entangle];

impl Mode {
    /// Resolve a wire id to a mode.
    ///
    /// Unknown ids are rejected with [`ModeError::UnknownId`]; the
    /// caller's current mode is not consulted or changed here.
    pub fn from_id(id: i32) -> Result<Self, ModeError> {
        match id {
            0 => Ok(Mode::Standard),
            1 => Ok(Mode::Galaxy),
            2 => Ok(Mode::Entangle),
            _ => Err(ModeError::UnknownId { id }),
        }
    }

    /// The wire id of this mode.
    pub fn id(self) -> i32 {
        self as i32
    }

    /// Particle-count ceiling for this mode, if it has one.
    ///
    /// Galaxy mode is O(N²) per step; the cap is the capacity contract
    /// that keeps a step inside an interactive frame budget. The O(N)
    /// modes are bounded only by the construction-time limit
    /// [`MAX_PARTICLES`](crate::layout::MAX_PARTICLES).
    pub fn max_particles(self) -> Option<usize> {
        match self {
            Mode::Galaxy => Some(1_000),
            Mode::Standard | Mode::Entangle => None,
        }
    }

    /// Per-step velocity damping factor for this mode.
    ///
    /// Standard damps noticeably so pointer-driven motion settles.
    /// Galaxy runs undamped: orbits must not decay, and the momentum
    /// bookkeeping only balances without drag. Entangle keeps a light
    /// decay so bound pairs settle at rest separation instead of
    /// oscillating indefinitely.
    pub fn damping(self) -> f32 {
        match self {
            Mode::Standard => 0.99,
            Mode::Galaxy => 1.0,
            Mode::Entangle => 0.995,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Standard => write!(f, "standard"),
            Mode::Galaxy => write!(f, "galaxy"),
            Mode::Entangle => write!(f, "entangle"),
        }
    }
}
