//! The Mote simulation engine: a real-time 2D particle system.
//!
//! An [`Engine`] owns a fixed population of particles in a toroidal
//! world and advances them one discrete step at a time under the
//! active force model ([`Mode`](mote_core::Mode)). Each step publishes
//! a [`Frame`]: a read-only, flat `f32` view of the full particle
//! state, laid out for zero-copy consumption by an external renderer.
//!
//! # Ownership model
//!
//! `Engine` is stepped through `&mut self` and read through borrowed
//! [`Frame`]s. A frame borrows from the engine, so the borrow checker
//! rules out reading state mid-update: the caller must drop the frame
//! before stepping again.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod forces;
pub mod frame;
pub mod metrics;
pub mod store;

pub use config::EngineConfig;
pub use engine::Engine;
pub use frame::Frame;
pub use metrics::StepMetrics;
pub use store::ParticleStore;
