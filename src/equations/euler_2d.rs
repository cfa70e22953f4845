//! 2D compressible Euler equations for a calorically perfect gas.
//!
//! The conservative variables are Q = (ρ, ρu, ρv, ρE):
//!
//! ∂ρ/∂t  + ∂(ρu)/∂x + ∂(ρv)/∂y = 0                          (mass)
//! ∂(ρu)/∂t + ∂(ρu² + p)/∂x + ∂(ρuv)/∂y = 0                  (x-momentum)
//! ∂(ρv)/∂t + ∂(ρuv)/∂x + ∂(ρv² + p)/∂y = 0                  (y-momentum)
//! ∂(ρE)/∂t + ∂(u(ρE + p))/∂x + ∂(v(ρE + p))/∂y = 0          (energy)
//!
//! closed by the ideal-gas law p = (γ−1)(ρE − ½ρ(u² + v²)) with γ = 1.4
//! and R = 287.05 J/(kg·K).
//!
//! Primitive recovery carries two guards for states encountered
//! transiently mid-sweep: the density in the kinetic term is floored at
//! 1e-4 and the recovered pressure at 10 Pa. Both are far below the
//! commit-time invariant floors (ρ ≥ 0.05, p ≥ 100) enforced by the
//! positivity pass; the evaluation path stays permissive so a single
//! degenerate cell cannot poison a whole sweep. The guards are written as
//! comparisons so a NaN input propagates to the output instead of being
//! silently clamped away; divergence detection depends on that.

use std::ops::{Add, Mul, Sub};

/// Ratio of specific heats for air.
pub const GAMMA: f64 = 1.4;

/// Specific gas constant for air, J/(kg·K).
pub const R_GAS: f64 = 287.05;

/// Density floor in the kinetic term of primitive recovery.
const RHO_GUARD: f64 = 1e-4;

/// Pressure floor during primitive recovery (intra-step leniency).
const P_EVAL_FLOOR: f64 = 10.0;

/// Additive density guard for velocity and derived-field divisions.
const DIV_GUARD: f64 = 1e-9;

/// Conservative state of one cell: (ρ, ρu, ρv, ρE).
///
/// Arithmetic is carried in `f64`; the field storage narrows to `f32`
/// (see [`crate::solver::EulerField2D`]).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EulerState2D {
    /// Density ρ.
    pub rho: f64,
    /// x-momentum ρu.
    pub rho_u: f64,
    /// y-momentum ρv.
    pub rho_v: f64,
    /// Total energy per unit volume ρE.
    pub rho_e: f64,
}

impl EulerState2D {
    /// Create a new conservative state.
    #[inline(always)]
    pub fn new(rho: f64, rho_u: f64, rho_v: f64, rho_e: f64) -> Self {
        Self {
            rho,
            rho_u,
            rho_v,
            rho_e,
        }
    }

    /// Create a state from primitive variables (ρ, u, v, p).
    #[inline(always)]
    pub fn from_primitives(rho: f64, u: f64, v: f64, p: f64, gamma: f64) -> Self {
        Self {
            rho,
            rho_u: rho * u,
            rho_v: rho * v,
            rho_e: p / (gamma - 1.0) + 0.5 * rho * (u * u + v * v),
        }
    }

    /// Create a zero state.
    #[inline(always)]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Velocity components (u, v), guarded against vanishing density.
    #[inline(always)]
    pub fn velocity(&self) -> (f64, f64) {
        let inv = 1.0 / (self.rho + DIV_GUARD);
        (self.rho_u * inv, self.rho_v * inv)
    }

    /// Velocity magnitude √(u² + v²).
    #[inline(always)]
    pub fn speed(&self) -> f64 {
        let (u, v) = self.velocity();
        (u * u + v * v).sqrt()
    }

    /// True iff all four components are finite.
    #[inline(always)]
    pub fn is_finite(&self) -> bool {
        self.rho.is_finite()
            && self.rho_u.is_finite()
            && self.rho_v.is_finite()
            && self.rho_e.is_finite()
    }

    /// Convert to array representation [ρ, ρu, ρv, ρE].
    #[inline(always)]
    pub fn to_array(&self) -> [f64; 4] {
        [self.rho, self.rho_u, self.rho_v, self.rho_e]
    }

    /// Create from array representation [ρ, ρu, ρv, ρE].
    #[inline(always)]
    pub fn from_array(arr: [f64; 4]) -> Self {
        Self {
            rho: arr[0],
            rho_u: arr[1],
            rho_v: arr[2],
            rho_e: arr[3],
        }
    }
}

impl Add for EulerState2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            rho: self.rho + other.rho,
            rho_u: self.rho_u + other.rho_u,
            rho_v: self.rho_v + other.rho_v,
            rho_e: self.rho_e + other.rho_e,
        }
    }
}

impl Sub for EulerState2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            rho: self.rho - other.rho,
            rho_u: self.rho_u - other.rho_u,
            rho_v: self.rho_v - other.rho_v,
            rho_e: self.rho_e - other.rho_e,
        }
    }
}

impl Mul<f64> for EulerState2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            rho: self.rho * scalar,
            rho_u: self.rho_u * scalar,
            rho_v: self.rho_v * scalar,
            rho_e: self.rho_e * scalar,
        }
    }
}

impl Mul<EulerState2D> for f64 {
    type Output = EulerState2D;

    fn mul(self, state: EulerState2D) -> EulerState2D {
        state * self
    }
}

/// The γ-law gas model.
#[derive(Clone, Copy, Debug)]
pub struct Euler2D {
    /// Ratio of specific heats.
    pub gamma: f64,
    /// Specific gas constant, J/(kg·K).
    pub r_gas: f64,
}

impl Default for Euler2D {
    fn default() -> Self {
        Self {
            gamma: GAMMA,
            r_gas: R_GAS,
        }
    }
}

impl Euler2D {
    /// Create a gas model with a custom γ-law index.
    pub fn new(gamma: f64, r_gas: f64) -> Self {
        Self { gamma, r_gas }
    }

    /// Static pressure recovered from a conservative state:
    ///
    /// p = (γ−1)·(ρE − ½(ρu² + ρv²)/ρ)
    ///
    /// The kinetic-term density is floored at 1e-4 and the result at 10 Pa;
    /// both guards propagate NaN so a non-finite state stays detectable.
    #[inline(always)]
    pub fn pressure(&self, q: &EulerState2D) -> f64 {
        let rho = if q.rho < RHO_GUARD { RHO_GUARD } else { q.rho };
        let kinetic = 0.5 * (q.rho_u * q.rho_u + q.rho_v * q.rho_v) / rho;
        let p = (self.gamma - 1.0) * (q.rho_e - kinetic);
        if p < P_EVAL_FLOOR {
            P_EVAL_FLOOR
        } else {
            p
        }
    }

    /// Total energy per unit volume from primitives:
    ///
    /// ρE = p/(γ−1) + ½ρ(u² + v²)
    #[inline(always)]
    pub fn energy(&self, rho: f64, u: f64, v: f64, p: f64) -> f64 {
        p / (self.gamma - 1.0) + 0.5 * rho * (u * u + v * v)
    }

    /// Sound speed c = √(γp/ρ).
    #[inline(always)]
    pub fn sound_speed(&self, rho: f64, p: f64) -> f64 {
        (self.gamma * p / (rho + DIV_GUARD)).sqrt()
    }

    /// Static temperature T = p/(ρR).
    #[inline(always)]
    pub fn temperature(&self, rho: f64, p: f64) -> f64 {
        p / ((rho + DIV_GUARD) * self.r_gas)
    }

    /// Local maximum wave speed |v| + c, the CFL-relevant signal speed.
    #[inline(always)]
    pub fn max_wave_speed(&self, q: &EulerState2D) -> f64 {
        let p = self.pressure(q);
        q.speed() + self.sound_speed(q.rho, p)
    }

    /// Mach number |v|/c.
    #[inline(always)]
    pub fn mach(&self, q: &EulerState2D) -> f64 {
        let p = self.pressure(q);
        q.speed() / self.sound_speed(q.rho, p)
    }
}
