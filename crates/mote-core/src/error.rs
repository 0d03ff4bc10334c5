//! Error types for the Mote particle simulation engine.
//!
//! Only two operations can fail: construction (rejecting an unusable
//! configuration) and mode selection (rejecting an unknown or
//! over-capacity mode). Everything else, the step function included,
//! is total by design — numeric edge cases are absorbed internally by
//! softening and clamping, never surfaced as errors.

use std::error::Error;
use std::fmt;

use crate::mode::Mode;

/// Errors detected while validating an engine configuration.
///
/// Returned from `Engine::new`. The engine is not constructed on
/// failure, so no state exists to corrupt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// Particle count is zero; an empty engine has nothing to step.
    ZeroParticles,
    /// Particle count exceeds the construction-time ceiling.
    TooManyParticles {
        /// The requested count.
        requested: usize,
        /// The ceiling ([`MAX_PARTICLES`](crate::layout::MAX_PARTICLES)).
        max: usize,
    },
    /// A world dimension is NaN, infinite, zero, or negative.
    InvalidWorldBounds {
        /// The configured width.
        width: f32,
        /// The configured height.
        height: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroParticles => write!(f, "particle count must be at least 1"),
            Self::TooManyParticles { requested, max } => {
                write!(f, "particle count {requested} exceeds maximum of {max}")
            }
            Self::InvalidWorldBounds { width, height } => {
                write!(
                    f,
                    "world bounds must be finite and positive, got {width}x{height}"
                )
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors from a rejected mode-change request.
///
/// On rejection the engine's current mode is left unchanged; the next
/// step runs under the previously active model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeError {
    /// The id does not name any mode.
    UnknownId {
        /// The offending wire id.
        id: i32,
    },
    /// The mode's particle-count ceiling is below the engine's count.
    ///
    /// Surfaces the O(N²) capacity contract of galaxy mode at the API
    /// instead of letting callers discover the slowdown empirically.
    TooManyParticles {
        /// The requested mode.
        mode: Mode,
        /// The engine's (immutable) particle count.
        count: usize,
        /// The mode's ceiling.
        max: usize,
    },
}

impl fmt::Display for ModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownId { id } => write!(f, "unknown mode id {id}"),
            Self::TooManyParticles { mode, count, max } => {
                write!(
                    f,
                    "{mode} mode supports at most {max} particles, engine has {count}"
                )
            }
        }
    }
}

impl Error for ModeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        assert_eq!(
            format!("{}", ConfigError::ZeroParticles),
            "particle count must be at least 1"
        );
        let msg = format!(
            "{}",
            ConfigError::TooManyParticles {
                requested: 20_000,
                max: 16_384,
            }
        );
        assert!(msg.contains("20000"));
        assert!(msg.contains("16384"));
        let msg = format!(
            "{}",
            ConfigError::InvalidWorldBounds {
                width: 0.0,
                height: 600.0,
            }
        );
        assert!(msg.contains("0x600"));
    }

    #[test]
    fn mode_error_display() {
        let msg = format!("{}", ModeError::UnknownId { id: 99 });
        assert!(msg.contains("99"));
        let msg = format!(
            "{}",
            ModeError::TooManyParticles {
                mode: Mode::Galaxy,
                count: 5_000,
                max: 1_000,
            }
        );
        assert!(msg.contains("galaxy"));
        assert!(msg.contains("5000"));
        assert!(msg.contains("1000"));
    }

    #[test]
    fn errors_implement_std_error() {
        fn assert_error<E: Error>(_: &E) {}
        assert_error(&ConfigError::ZeroParticles);
        assert_error(&ModeError::UnknownId { id: -1 });
    }
}
