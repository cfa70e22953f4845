//! Read-only scalar projections of the committed field.
//!
//! Each mode produces a freshly allocated nx·ny array (one value per
//! cell, same row-major layout as the field) together with its observed
//! extrema. The projection reads the committed buffer only and never
//! mutates solver state; all divisions by density carry a 1e-9 guard.

use crate::equations::{Euler2D, EulerState2D};
use crate::solver::field::EulerField2D;

/// Scalar of interest for visualization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarMode {
    /// Density ρ.
    Density,
    /// Static pressure p.
    Pressure,
    /// Velocity magnitude √(u² + v²).
    Velocity,
    /// Static temperature p/(ρR).
    Temperature,
    /// Mach number |v|/c.
    Mach,
    /// Numerical schlieren log(1 + 10·‖∇ρ‖).
    Schlieren,
}

impl ScalarMode {
    /// All supported modes.
    pub const ALL: [ScalarMode; 6] = [
        ScalarMode::Density,
        ScalarMode::Pressure,
        ScalarMode::Velocity,
        ScalarMode::Temperature,
        ScalarMode::Mach,
        ScalarMode::Schlieren,
    ];

    /// Human-readable name for debugging and UI labels.
    pub fn name(&self) -> &'static str {
        match self {
            ScalarMode::Density => "density",
            ScalarMode::Pressure => "pressure",
            ScalarMode::Velocity => "velocity",
            ScalarMode::Temperature => "temperature",
            ScalarMode::Mach => "mach",
            ScalarMode::Schlieren => "schlieren",
        }
    }
}

/// A scalar projection with its observed extrema.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    /// One value per cell, row-major (j·nx + i).
    pub values: Vec<f32>,
    /// Smallest produced value.
    pub min: f32,
    /// Largest produced value.
    pub max: f32,
}

/// Project the field onto the requested scalar.
pub fn scalar_field(field: &EulerField2D, eq: &Euler2D, mode: ScalarMode) -> ScalarField {
    let nx = field.nx();
    let ny = field.ny();
    let mut values = vec![0.0f32; nx * ny];

    match mode {
        ScalarMode::Schlieren => {
            // ∇ρ by central differences on interior cells, zero on the
            // grid borders (where log(1 + 0) = 0 already).
            for j in 1..ny - 1 {
                for i in 1..nx - 1 {
                    let gx = 0.5 * (field.get_state(i + 1, j).rho - field.get_state(i - 1, j).rho);
                    let gy = 0.5 * (field.get_state(i, j + 1).rho - field.get_state(i, j - 1).rho);
                    let grad = (gx * gx + gy * gy).sqrt();
                    values[j * nx + i] = (1.0 + 10.0 * grad).ln() as f32;
                }
            }
        }
        _ => {
            for j in 0..ny {
                for i in 0..nx {
                    let q = field.get_state(i, j);
                    values[j * nx + i] = point_value(&q, eq, mode) as f32;
                }
            }
        }
    }

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in &values {
        min = min.min(v);
        max = max.max(v);
    }

    ScalarField { values, min, max }
}

#[inline(always)]
fn point_value(q: &EulerState2D, eq: &Euler2D, mode: ScalarMode) -> f64 {
    match mode {
        ScalarMode::Density => q.rho,
        ScalarMode::Pressure => eq.pressure(q),
        ScalarMode::Velocity => q.speed(),
        ScalarMode::Temperature => eq.temperature(q.rho, eq.pressure(q)),
        ScalarMode::Mach => eq.mach(q),
        ScalarMode::Schlieren => unreachable!("schlieren is stencil-based"),
    }
}
