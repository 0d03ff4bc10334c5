//! Core types for the Mote particle simulation engine.
//!
//! This is the leaf crate with zero dependencies. It defines the
//! fundamental vocabulary shared by the engine and its FFI boundary:
//! the force-model [`Mode`] enumeration, the [`TickId`] counter, the
//! flat particle memory layout, and the two error types a caller can
//! observe ([`ConfigError`] and [`ModeError`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod layout;
pub mod mode;

pub use error::{ConfigError, ModeError};
pub use id::TickId;
pub use layout::{SLOT_AUX, SLOT_VX, SLOT_VY, SLOT_X, SLOT_Y, STRIDE};
pub use mode::Mode;
