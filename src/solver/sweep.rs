//! Directional face sweeps and the CFL time step.
//!
//! One step is a first-order Lie splitting of the 2D update. The X-sweep
//! evaluates the Roe kernel on the committed field and accumulates
//! equal-and-opposite increments `±(dt/dx)·F*` into the tentative field;
//! every X-flux reads the same frozen source, so its faces may be
//! traversed in any order. The Y-sweep then advances the intermediate
//! state the X-sweep produced: its fluxes are evaluated on the tentative
//! buffer as the X-sweep left it (a rolling row snapshot keeps
//! already-applied Y increments out of the face states) and the
//! increments accumulate into that same buffer. The tentative buffer is
//! not re-seeded between sweeps.
//!
//! The time step is CFL-limited by the fastest wave in the field, with
//! the signal speed floored at 10 m/s and the step hard-capped at 5e-5 s
//! to bound startup transients.

use crate::equations::{Euler2D, EulerState2D};
use crate::flux::roe_flux_euler_2d;
use crate::solver::field::EulerField2D;

/// Floor on the global signal speed used in the CFL estimate.
pub const WAVE_SPEED_FLOOR: f64 = 10.0;

/// Hard cap on the time step, seconds.
pub const DT_MAX: f64 = 5e-5;

const X_NORMAL: (f64, f64) = (1.0, 0.0);
const Y_NORMAL: (f64, f64) = (0.0, 1.0);

/// Fastest signal speed max(|v| + c) over the field, floored at
/// [`WAVE_SPEED_FLOOR`].
pub fn max_wave_speed(field: &EulerField2D, eq: &Euler2D) -> f64 {
    let mut max_speed: f64 = 0.0;
    for j in 0..field.ny() {
        for i in 0..field.nx() {
            let q = field.get_state(i, j);
            max_speed = max_speed.max(eq.max_wave_speed(&q));
        }
    }
    if max_speed < WAVE_SPEED_FLOOR {
        WAVE_SPEED_FLOOR
    } else {
        max_speed
    }
}

/// Parallel wave-speed scan.
#[cfg(feature = "parallel")]
pub fn max_wave_speed_parallel(field: &EulerField2D, eq: &Euler2D) -> f64 {
    use rayon::prelude::*;

    let max_speed = field
        .data()
        .par_chunks_exact(4)
        .map(|c| {
            let q = EulerState2D::new(c[0] as f64, c[1] as f64, c[2] as f64, c[3] as f64);
            eq.max_wave_speed(&q)
        })
        .reduce(|| 0.0, f64::max);

    if max_speed < WAVE_SPEED_FLOOR {
        WAVE_SPEED_FLOOR
    } else {
        max_speed
    }
}

/// CFL-limited time step: min(cfl·min(dx, dy)/S, [`DT_MAX`]).
pub fn compute_dt(field: &EulerField2D, eq: &Euler2D, cfl: f64, dx: f64, dy: f64) -> f64 {
    #[cfg(not(feature = "parallel"))]
    let s = max_wave_speed(field, eq);
    #[cfg(feature = "parallel")]
    let s = max_wave_speed_parallel(field, eq);

    (cfl * dx.min(dy) / s).min(DT_MAX)
}

/// X-sweep: apply fluxes through all vertical interior faces.
///
/// For each face between (i, j) and (i+1, j), subtract `(dt/dx)·F*` from
/// the left cell of the tentative field and add it to the right cell.
/// With `periodic`, the wrap-around face between (nx−1, j) and (0, j) is
/// included (conservation test hook).
pub fn x_sweep(
    q: &EulerField2D,
    q_next: &mut EulerField2D,
    eq: &Euler2D,
    dt_dx: f64,
    periodic: bool,
) {
    let nx = q.nx();
    let ny = q.ny();

    for j in 0..ny {
        for i in 0..nx - 1 {
            let flux = roe_flux_euler_2d(&q.get_state(i, j), &q.get_state(i + 1, j), X_NORMAL, eq);
            q_next.add_scaled(i, j, &flux, -dt_dx);
            q_next.add_scaled(i + 1, j, &flux, dt_dx);
        }
        if periodic {
            let flux =
                roe_flux_euler_2d(&q.get_state(nx - 1, j), &q.get_state(0, j), X_NORMAL, eq);
            q_next.add_scaled(nx - 1, j, &flux, -dt_dx);
            q_next.add_scaled(0, j, &flux, dt_dx);
        }
    }
}

/// Row-parallel X-sweep. Vertical faces touch only their own row, so rows
/// are independent work items.
#[cfg(feature = "parallel")]
pub fn x_sweep_parallel(
    q: &EulerField2D,
    q_next: &mut EulerField2D,
    eq: &Euler2D,
    dt_dx: f64,
    periodic: bool,
) {
    use rayon::prelude::*;

    let nx = q.nx();

    q_next
        .data_mut()
        .par_chunks_mut(nx * 4)
        .enumerate()
        .for_each(|(j, row)| {
            for i in 0..nx - 1 {
                let flux =
                    roe_flux_euler_2d(&q.get_state(i, j), &q.get_state(i + 1, j), X_NORMAL, eq);
                apply_to_row(row, i, &flux, -dt_dx);
                apply_to_row(row, i + 1, &flux, dt_dx);
            }
            if periodic {
                let flux =
                    roe_flux_euler_2d(&q.get_state(nx - 1, j), &q.get_state(0, j), X_NORMAL, eq);
                apply_to_row(row, nx - 1, &flux, -dt_dx);
                apply_to_row(row, 0, &flux, dt_dx);
            }
        });
}

#[cfg(feature = "parallel")]
#[inline(always)]
fn apply_to_row(row: &mut [f32], i: usize, flux: &EulerState2D, scale: f64) {
    let b = i * 4;
    row[b] = (row[b] as f64 + scale * flux.rho) as f32;
    row[b + 1] = (row[b + 1] as f64 + scale * flux.rho_u) as f32;
    row[b + 2] = (row[b + 2] as f64 + scale * flux.rho_v) as f32;
    row[b + 3] = (row[b + 3] as f64 + scale * flux.rho_e) as f32;
}

/// Y-sweep: apply fluxes through all horizontal interior faces, with the
/// same sign convention as [`x_sweep`].
///
/// Second half of the Lie splitting: face states are read from the
/// tentative buffer the X-sweep wrote into, so the Y-direction fluxes
/// act on the X-swept intermediate state. A rolling snapshot of each
/// face's lower row keeps the evaluation frozen at that intermediate
/// while the increments accumulate into the same buffer, so the face
/// order does not affect the result. With `periodic`, the wrap-around
/// face between (i, ny−1) and (i, 0) is included.
pub fn y_sweep(q_next: &mut EulerField2D, eq: &Euler2D, dt_dy: f64, periodic: bool) {
    let nx = q_next.nx();
    let ny = q_next.ny();

    // `lower` holds the X-swept (pre-Y) states of row j.
    let mut lower: Vec<EulerState2D> = (0..nx).map(|i| q_next.get_state(i, 0)).collect();
    let first_row = if periodic { lower.clone() } else { Vec::new() };

    for j in 0..ny - 1 {
        for i in 0..nx {
            let upper = q_next.get_state(i, j + 1);
            let flux = roe_flux_euler_2d(&lower[i], &upper, Y_NORMAL, eq);
            q_next.add_scaled(i, j, &flux, -dt_dy);
            q_next.add_scaled(i, j + 1, &flux, dt_dy);
            lower[i] = upper;
        }
    }
    if periodic {
        for i in 0..nx {
            let flux = roe_flux_euler_2d(&lower[i], &first_row[i], Y_NORMAL, eq);
            q_next.add_scaled(i, ny - 1, &flux, -dt_dy);
            q_next.add_scaled(i, 0, &flux, dt_dy);
        }
    }
}
