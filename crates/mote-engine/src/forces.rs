//! Force kernels for the three simulation modes.
//!
//! Each kernel fills a caller-provided acceleration buffer from
//! read-only store state, one `[ax, ay]` pair per particle. Keeping
//! the force pass separate from integration means every particle sees
//! the same pre-step positions, which is what makes the pairwise
//! kernels exactly antisymmetric (the force galaxy mode's momentum
//! bookkeeping relies on).
//!
//! Numeric policy: every inverse-distance term is softened by a
//! minimum-distance floor before division, and the final acceleration
//! is clamped per axis to [`MAX_ACCEL`]. No input reachable through
//! the engine can produce NaN or infinity here.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::store::ParticleStore;

/// Softening floor, in world units, added in quadrature to every
/// inverse-distance denominator.
pub const SOFTENING: f32 = 8.0;

/// Per-axis acceleration ceiling, in world units per step squared.
pub const MAX_ACCEL: f32 = 1.5;

/// Falloff length scale of the pointer pull, in world units.
pub const POINTER_RADIUS: f32 = 150.0;

/// Pointer pull strength at the falloff scale.
pub const POINTER_PULL: f32 = 0.5;

/// Half-range of the per-step uniform jitter in standard mode.
pub const JITTER: f32 = 0.05;

/// Gravitational constant for galaxy mode, tuned for display-unit
/// worlds and masses in the initial [0.5, 2.5) range.
pub const GRAVITY: f32 = 2.0;

/// Rest separation of an entangled pair, in world units.
pub const ENTANGLE_REST: f32 = 50.0;

/// Spring stiffness of the pair bond, per step squared.
pub const ENTANGLE_STIFFNESS: f32 = 0.01;

#[inline]
fn clamp_axis(a: f32) -> f32 {
    a.clamp(-MAX_ACCEL, MAX_ACCEL)
}

/// Standard mode: softened inverse-distance pull toward the pointer,
/// plus a small uniform jitter for organic motion.
///
/// The pull magnitude is `POINTER_PULL * POINTER_RADIUS / (d + SOFTENING)`,
/// so it peaks (and is clamped) when the pointer sits on top of a
/// particle and falls off smoothly with distance. The jitter stream
/// comes from the caller's per-step seeded RNG, preserving the
/// determinism contract.
pub fn fill_standard(
    store: &ParticleStore,
    pointer: (f32, f32),
    rng: &mut ChaCha8Rng,
    out: &mut [[f32; 2]],
) {
    for (i, accel) in out.iter_mut().enumerate().take(store.len()) {
        let (x, y) = store.position(i);
        let dx = pointer.0 - x;
        let dy = pointer.1 - y;
        let dist = (dx * dx + dy * dy).sqrt();
        let pull = POINTER_PULL * POINTER_RADIUS / (dist + SOFTENING);
        // Softened direction: at dist == 0 the directional term vanishes
        // instead of dividing by zero.
        let inv = 1.0 / (dist + SOFTENING);
        let jx = (rng.random::<f32>() * 2.0 - 1.0) * JITTER;
        let jy = (rng.random::<f32>() * 2.0 - 1.0) * JITTER;
        accel[0] = clamp_axis(dx * inv * pull + jx);
        accel[1] = clamp_axis(dy * inv * pull + jy);
    }
}

/// Galaxy mode: full pairwise N-body gravity with Plummer softening.
///
/// O(N²) per step by design — the direct sum is exact and exactly
/// antisymmetric, and the engine caps the particle count for this
/// mode low enough to stay interactive. The aux slot supplies each
/// particle's gravitational mass.
pub fn fill_galaxy(store: &ParticleStore, out: &mut [[f32; 2]]) {
    let n = store.len();
    for (i, accel) in out.iter_mut().enumerate().take(n) {
        let (xi, yi) = store.position(i);
        let mut ax = 0.0f32;
        let mut ay = 0.0f32;
        for j in 0..n {
            if j == i {
                continue;
            }
            let (xj, yj) = store.position(j);
            let dx = xj - xi;
            let dy = yj - yi;
            let dist_sq = dx * dx + dy * dy + SOFTENING * SOFTENING;
            let inv = 1.0 / dist_sq.sqrt();
            let inv_cubed = inv * inv * inv;
            let pull = GRAVITY * store.aux(j) * inv_cubed;
            ax += dx * pull;
            ay += dy * pull;
        }
        accel[0] = clamp_axis(ax);
        accel[1] = clamp_axis(ay);
    }
}

/// Entangle mode: particle 2k bonds with 2k+1 through a linear spring
/// pulling the pair toward [`ENTANGLE_REST`] separation.
///
/// Pairs are independent of each other, O(N) per step. A trailing
/// unpaired particle (odd N) receives no force and drifts. Coincident
/// partners have no defined bond direction; they receive no force this
/// step and separate under their own velocities.
pub fn fill_entangle(store: &ParticleStore, out: &mut [[f32; 2]]) {
    let n = store.len();
    for accel in out.iter_mut().take(n) {
        *accel = [0.0, 0.0];
    }
    let mut k = 0;
    while k + 1 < n {
        let (xa, ya) = store.position(k);
        let (xb, yb) = store.position(k + 1);
        let dx = xb - xa;
        let dy = yb - ya;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > f32::EPSILON {
            let stretch = dist - ENTANGLE_REST;
            let scale = ENTANGLE_STIFFNESS * stretch / dist;
            let ax = clamp_axis(dx * scale);
            let ay = clamp_axis(dy * scale);
            out[k] = [ax, ay];
            out[k + 1] = [-ax, -ay];
        }
        k += 2;
    }
}
