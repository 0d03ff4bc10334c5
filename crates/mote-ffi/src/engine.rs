//! Engine lifecycle FFI: create, step, read, configure, destroy.
//!
//! Engines live in a global handle table behind a mutex. The lock is
//! held only for the duration of a call; the simulation contract is
//! still single-owner (spec'd one engine per render loop), the mutex
//! just keeps accidental cross-thread use memory-safe.
//!
//! # Buffer validity window
//!
//! [`mote_engine_step`] hands out a [`MoteBufferView`] pointing at the
//! engine's internal buffer. The pointer targets the store's heap
//! allocation, which never moves or reallocates after construction,
//! so it stays valid until the engine is destroyed — but its
//! *contents* are only meaningful until the next `mote_engine_step`
//! call on that handle. Hosts that cannot honor that window copy out
//! via [`mote_engine_read`] instead.

use std::sync::Mutex;

use mote_core::{Mode, TickId};
use mote_engine::{Engine, EngineConfig};

use crate::handle::HandleTable;
use crate::status::MoteStatus;

static ENGINES: Mutex<HandleTable<Engine>> = Mutex::new(HandleTable::new());

/// Borrowed view of the flat particle buffer after a step.
///
/// `len` counts `f32` elements (`particle_count * 5`), laid out
/// `[x, y, vx, vy, aux]` per particle. `tick` is the step the
/// contents reflect.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct MoteBufferView {
    /// Pointer into the engine's buffer. Read-only; never freed by
    /// the host.
    pub data: *const f32,
    /// Number of `f32` elements behind `data`.
    pub len: usize,
    /// Tick the buffer contents reflect.
    pub tick: u64,
}

/// C mirror of the engine's per-step timing metrics.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoteStepMetrics {
    /// Tick counter after the measured step call.
    pub tick: u64,
    /// Iterations the call advanced.
    pub iterations: u32,
    /// Force-pass time, microseconds.
    pub force_us: u64,
    /// Integrate-pass time, microseconds.
    pub integrate_us: u64,
    /// Whole-call wall-clock time, microseconds.
    pub total_us: u64,
}

/// Create an engine.
///
/// On success writes the new handle to `engine_out` and returns
/// `MOTE_OK`. Rejects null `engine_out` and invalid configurations
/// (zero or oversized particle count, non-finite or non-positive
/// world bounds).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mote_engine_create(
    width: f32,
    height: f32,
    count: usize,
    seed: u64,
    engine_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if engine_out.is_null() {
            return MoteStatus::InvalidArgument as i32;
        }
        let config = EngineConfig {
            width,
            height,
            count,
            seed,
        };
        let engine = match Engine::new(config) {
            Ok(e) => e,
            Err(e) => return MoteStatus::from(&e) as i32,
        };
        let handle = ffi_lock!(ENGINES).insert(engine);
        // SAFETY: engine_out is non-null and valid per caller contract.
        unsafe { *engine_out = handle };
        MoteStatus::Ok as i32
    })
}

/// Destroy an engine, releasing its buffers.
///
/// Outstanding [`MoteBufferView`]s for this handle become dangling;
/// the host must not read them afterwards. Double-destroy returns
/// `InvalidHandle` and is otherwise harmless.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mote_engine_destroy(handle: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ENGINES).remove(handle) {
            Some(_) => MoteStatus::Ok as i32,
            None => MoteStatus::InvalidHandle as i32,
        }
    })
}

/// Advance the simulation `iterations` steps and publish the buffer.
///
/// `iterations > 1` is the overclock path; `0` refreshes the view
/// without advancing state. `view_out` may be null when the host only
/// wants to advance.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mote_engine_step(handle: u64, iterations: u32, view_out: *mut MoteBufferView) -> i32 {
    ffi_guard!({
        let mut engines = ffi_lock!(ENGINES);
        let engine = match engines.get_mut(handle) {
            Some(e) => e,
            None => return MoteStatus::InvalidHandle as i32,
        };
        let frame = engine.step(iterations);
        if !view_out.is_null() {
            let view = MoteBufferView {
                data: frame.as_slice().as_ptr(),
                len: frame.as_slice().len(),
                tick: frame.tick().0,
            };
            // SAFETY: view_out is non-null and valid per caller contract.
            unsafe { *view_out = view };
        }
        MoteStatus::Ok as i32
    })
}

/// Update the pointer target consumed by the next step.
///
/// Non-finite coordinates are accepted and ignored, matching the
/// engine's pointer sanitization.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mote_engine_set_pointer(handle: u64, x: f32, y: f32) -> i32 {
    ffi_guard!({
        let mut engines = ffi_lock!(ENGINES);
        match engines.get_mut(handle) {
            Some(engine) => {
                engine.set_pointer(x, y);
                MoteStatus::Ok as i32
            }
            None => MoteStatus::InvalidHandle as i32,
        }
    })
}

/// Select the force model by wire id (0 standard, 1 galaxy, 2 entangle).
///
/// Rejections (`InvalidMode`) leave the active mode unchanged; this
/// includes galaxy mode's particle cap.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mote_engine_set_mode(handle: u64, mode_id: i32) -> i32 {
    ffi_guard!({
        let mut engines = ffi_lock!(ENGINES);
        match engines.get_mut(handle) {
            Some(engine) => match engine.set_mode(mode_id) {
                Ok(()) => MoteStatus::Ok as i32,
                Err(e) => MoteStatus::from(&e) as i32,
            },
            None => MoteStatus::InvalidHandle as i32,
        }
    })
}

/// The active mode's wire id, or a negative status for a bad handle.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mote_engine_mode(handle: u64) -> i32 {
    ffi_guard!({
        let engines = ffi_lock!(ENGINES);
        match engines.get(handle) {
            Some(engine) => engine.mode().id(),
            None => MoteStatus::InvalidHandle as i32,
        }
    })
}

/// Buffer length in `f32` elements (`particle_count * 5`), or -1 for
/// a bad handle.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mote_engine_buffer_len(handle: u64) -> i64 {
    match ENGINES.lock() {
        Ok(engines) => match engines.get(handle) {
            Some(engine) => (engine.particle_count() * mote_core::STRIDE) as i64,
            None => -1,
        },
        Err(_) => -1,
    }
}

/// Copy the current buffer into host memory.
///
/// The copying alternative to the borrowed view from
/// [`mote_engine_step`]: `out` must hold at least
/// [`mote_engine_buffer_len`] elements.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mote_engine_read(handle: u64, out: *mut f32, out_len: usize) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return MoteStatus::InvalidArgument as i32;
        }
        let engines = ffi_lock!(ENGINES);
        let engine = match engines.get(handle) {
            Some(e) => e,
            None => return MoteStatus::InvalidHandle as i32,
        };
        let frame = engine.frame();
        let src = frame.as_slice();
        if out_len < src.len() {
            return MoteStatus::BufferTooSmall as i32;
        }
        // SAFETY: out points to at least out_len valid f32 slots per
        // caller contract, and out_len >= src.len().
        let dst = unsafe { std::slice::from_raw_parts_mut(out, src.len()) };
        dst.copy_from_slice(src);
        MoteStatus::Ok as i32
    })
}

/// Re-seed the particle population and rewind to tick 0.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mote_engine_reset(handle: u64, seed: u64) -> i32 {
    ffi_guard!({
        let mut engines = ffi_lock!(ENGINES);
        match engines.get_mut(handle) {
            Some(engine) => {
                engine.reset(seed);
                MoteStatus::Ok as i32
            }
            None => MoteStatus::InvalidHandle as i32,
        }
    })
}

/// Current tick, or a negative status for a bad handle.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mote_engine_tick(handle: u64) -> i64 {
    match ENGINES.lock() {
        Ok(engines) => match engines.get(handle) {
            Some(engine) => {
                let TickId(t) = engine.current_tick();
                t as i64
            }
            None => MoteStatus::InvalidHandle as i64,
        },
        Err(_) => MoteStatus::InternalError as i64,
    }
}

/// Timing metrics from the most recent advancing step call.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mote_engine_metrics(handle: u64, metrics_out: *mut MoteStepMetrics) -> i32 {
    ffi_guard!({
        if metrics_out.is_null() {
            return MoteStatus::InvalidArgument as i32;
        }
        let engines = ffi_lock!(ENGINES);
        let engine = match engines.get(handle) {
            Some(e) => e,
            None => return MoteStatus::InvalidHandle as i32,
        };
        let m = engine.last_metrics();
        let out = MoteStepMetrics {
            tick: m.tick,
            iterations: m.iterations,
            force_us: m.force_us,
            integrate_us: m.integrate_us,
            total_us: m.total_us,
        };
        // SAFETY: metrics_out is non-null and valid per caller contract.
        unsafe { *metrics_out = out };
        MoteStatus::Ok as i32
    })
}

/// The particle-count ceiling of a mode: the capacity contract,
/// queryable before committing to a population size.
///
/// Uncapped modes report the construction-time ceiling. Unknown mode
/// ids return [`MoteStatus::InvalidMode`] as a negative value.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn mote_mode_max_particles(mode_id: i32) -> i64 {
    match Mode::from_id(mode_id) {
        Ok(mode) => mode
            .max_particles()
            .unwrap_or(mote_core::layout::MAX_PARTICLES) as i64,
        Err(_) => MoteStatus::InvalidMode as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mote_core::STRIDE;
    use std::ptr;

    const OK: i32 = MoteStatus::Ok as i32;

    fn create(count: usize, seed: u64) -> u64 {
        let mut handle = 0u64;
        let status = mote_engine_create(800.0, 600.0, count, seed, &mut handle);
        assert_eq!(status, OK);
        handle
    }

    #[test]
    fn create_step_read_destroy_lifecycle() {
        let handle = create(50, 42);

        let mut view = MoteBufferView {
            data: ptr::null(),
            len: 0,
            tick: 0,
        };
        assert_eq!(mote_engine_step(handle, 1, &mut view), OK);
        assert_eq!(view.len, 50 * STRIDE);
        assert_eq!(view.tick, 1);
        assert!(!view.data.is_null());

        assert_eq!(mote_engine_buffer_len(handle), (50 * STRIDE) as i64);
        assert_eq!(mote_engine_tick(handle), 1);

        assert_eq!(mote_engine_destroy(handle), OK);
        assert_eq!(
            mote_engine_destroy(handle),
            MoteStatus::InvalidHandle as i32
        );
    }

    #[test]
    fn create_rejects_null_out_and_bad_config() {
        assert_eq!(
            mote_engine_create(800.0, 600.0, 10, 0, ptr::null_mut()),
            MoteStatus::InvalidArgument as i32
        );
        let mut handle = 0u64;
        assert_eq!(
            mote_engine_create(800.0, 600.0, 0, 0, &mut handle),
            MoteStatus::ConfigError as i32
        );
        assert_eq!(
            mote_engine_create(0.0, 600.0, 10, 0, &mut handle),
            MoteStatus::ConfigError as i32
        );
    }

    #[test]
    fn stale_handle_is_rejected_everywhere() {
        let handle = create(10, 1);
        assert_eq!(mote_engine_destroy(handle), OK);

        let invalid = MoteStatus::InvalidHandle as i32;
        assert_eq!(mote_engine_step(handle, 1, ptr::null_mut()), invalid);
        assert_eq!(mote_engine_set_pointer(handle, 1.0, 2.0), invalid);
        assert_eq!(mote_engine_set_mode(handle, 0), invalid);
        assert_eq!(mote_engine_mode(handle), invalid);
        assert_eq!(mote_engine_reset(handle, 7), invalid);
        assert_eq!(mote_engine_buffer_len(handle), -1);
        assert_eq!(mote_engine_tick(handle), invalid as i64);
    }

    #[test]
    fn set_mode_round_trips_and_rejects_unknown_ids() {
        let handle = create(10, 1);
        assert_eq!(mote_engine_mode(handle), 0);
        assert_eq!(mote_engine_set_mode(handle, 2), OK);
        assert_eq!(mote_engine_mode(handle), 2);
        assert_eq!(
            mote_engine_set_mode(handle, 99),
            MoteStatus::InvalidMode as i32
        );
        assert_eq!(mote_engine_mode(handle), 2, "rejected id must not apply");
        mote_engine_destroy(handle);
    }

    #[test]
    fn galaxy_cap_surfaces_as_invalid_mode() {
        let handle = create(1_001, 1);
        assert_eq!(
            mote_engine_set_mode(handle, 1),
            MoteStatus::InvalidMode as i32
        );
        assert_eq!(mote_engine_mode(handle), 0);
        mote_engine_destroy(handle);
    }

    #[test]
    fn read_copies_the_view_contents() {
        let handle = create(20, 9);
        let mut view = MoteBufferView {
            data: ptr::null(),
            len: 0,
            tick: 0,
        };
        assert_eq!(mote_engine_step(handle, 2, &mut view), OK);

        let mut copy = vec![0.0f32; 20 * STRIDE];
        assert_eq!(mote_engine_read(handle, copy.as_mut_ptr(), copy.len()), OK);
        // SAFETY: the view is valid until the next step on this handle.
        #[allow(unsafe_code)]
        let borrowed = unsafe { std::slice::from_raw_parts(view.data, view.len) };
        assert_eq!(copy.as_slice(), borrowed);

        let mut short = vec![0.0f32; 5];
        assert_eq!(
            mote_engine_read(handle, short.as_mut_ptr(), short.len()),
            MoteStatus::BufferTooSmall as i32
        );
        assert_eq!(
            mote_engine_read(handle, ptr::null_mut(), 100),
            MoteStatus::InvalidArgument as i32
        );
        mote_engine_destroy(handle);
    }

    #[test]
    fn identical_seeds_step_identically_across_handles() {
        let a = create(40, 77);
        let b = create(40, 77);
        let mut buf_a = vec![0.0f32; 40 * STRIDE];
        let mut buf_b = vec![0.0f32; 40 * STRIDE];
        for _ in 0..10 {
            assert_eq!(mote_engine_step(a, 1, ptr::null_mut()), OK);
            assert_eq!(mote_engine_step(b, 1, ptr::null_mut()), OK);
        }
        assert_eq!(mote_engine_read(a, buf_a.as_mut_ptr(), buf_a.len()), OK);
        assert_eq!(mote_engine_read(b, buf_b.as_mut_ptr(), buf_b.len()), OK);
        assert_eq!(buf_a, buf_b);
        mote_engine_destroy(a);
        mote_engine_destroy(b);
    }

    #[test]
    fn reset_rewinds_tick() {
        let handle = create(10, 3);
        mote_engine_step(handle, 5, ptr::null_mut());
        assert_eq!(mote_engine_tick(handle), 5);
        assert_eq!(mote_engine_reset(handle, 99), OK);
        assert_eq!(mote_engine_tick(handle), 0);
        mote_engine_destroy(handle);
    }

    #[test]
    fn metrics_are_exposed() {
        let handle = create(10, 3);
        let mut m = MoteStepMetrics::default();
        assert_eq!(mote_engine_step(handle, 4, ptr::null_mut()), OK);
        assert_eq!(mote_engine_metrics(handle, &mut m), OK);
        assert_eq!(m.tick, 4);
        assert_eq!(m.iterations, 4);
        assert_eq!(
            mote_engine_metrics(handle, ptr::null_mut()),
            MoteStatus::InvalidArgument as i32
        );
        mote_engine_destroy(handle);
    }

    #[test]
    fn mode_caps_are_queryable() {
        assert_eq!(mote_mode_max_particles(1), 1_000);
        assert_eq!(
            mote_mode_max_particles(0),
            mote_core::layout::MAX_PARTICLES as i64
        );
        assert_eq!(
            mote_mode_max_particles(2),
            mote_core::layout::MAX_PARTICLES as i64
        );
        assert_eq!(
            mote_mode_max_particles(42),
            MoteStatus::InvalidMode as i64
        );
    }

    #[test]
    fn step_zero_refreshes_view_without_advancing() {
        let handle = create(10, 3);
        mote_engine_step(handle, 3, ptr::null_mut());
        let mut view = MoteBufferView {
            data: ptr::null(),
            len: 0,
            tick: 0,
        };
        assert_eq!(mote_engine_step(handle, 0, &mut view), OK);
        assert_eq!(view.tick, 3);
        mote_engine_destroy(handle);
    }
}
