//! Mote: a real-time 2D particle simulation engine.
//!
//! This is the top-level facade crate re-exporting the public API.
//! For most users, adding `mote` as a single dependency is enough;
//! hosts binding over C (or wasm) link `mote-ffi` instead.
//!
//! # Quick start
//!
//! ```rust
//! use mote::prelude::*;
//!
//! let mut engine = Engine::new(EngineConfig {
//!     width: 640.0,
//!     height: 480.0,
//!     count: 100,
//!     seed: 7,
//! })
//! .unwrap();
//!
//! // Per frame: report the pointer, advance, read the flat buffer.
//! engine.set_pointer(320.0, 240.0);
//! let frame = engine.step(1);
//! assert_eq!(frame.len(), 100);
//! assert_eq!(frame.as_slice().len(), 100 * STRIDE);
//!
//! // Switch force models between steps; invalid ids are rejected
//! // and leave the active mode unchanged.
//! engine.set_mode(Mode::Galaxy.id()).unwrap();
//! assert!(engine.set_mode(99).is_err());
//! assert_eq!(engine.mode(), Mode::Galaxy);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `mote-core` | `Mode`, `TickId`, error types, buffer layout |
//! | [`engine`] | `mote-engine` | `Engine`, `EngineConfig`, `Frame`, force kernels |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and the flat buffer layout (`mote-core`).
pub use mote_core as types;

/// The simulation engine (`mote-engine`).
///
/// [`engine::Engine`] is the main entry point; its force kernels and
/// tuning constants live in [`engine::forces`].
pub use mote_engine as engine;

/// Common imports for typical Mote usage.
///
/// ```rust
/// use mote::prelude::*;
/// ```
pub mod prelude {
    pub use mote_core::{
        ConfigError, Mode, ModeError, TickId, SLOT_AUX, SLOT_VX, SLOT_VY, SLOT_X, SLOT_Y, STRIDE,
    };
    pub use mote_engine::{Engine, EngineConfig, Frame, StepMetrics};
}
