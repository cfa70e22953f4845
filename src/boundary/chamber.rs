//! Chamber parameters and the isentropic flow relations.
//!
//! The user-facing knobs are stagnation (total) conditions in a virtual
//! settling chamber plus the surrounding ambient pressure. The inlet
//! static state follows from the isentropic relations at the design Mach
//! number M (γ = 1.4):
//!
//! T_static = T_total / (1 + 0.2·M²)
//! p_static = p_total / (1 + 0.2·M²)^{γ/(γ−1)}
//! ρ_static = p_static / (R·T_static)
//! u_static = M·√(γ·R·T_static)
//!
//! The ambient state is quiescent gas at 300 K and the ambient pressure.
//! Both states are cached as primitives and recomputed only when a
//! parameter changes; a step sees either the old pair or the new pair,
//! never a mixture.

use crate::equations::{Euler2D, EulerState2D};
use crate::error::SolverError;

/// Ambient (far-field) static temperature, K.
pub const T_AMBIENT: f64 = 300.0;

/// A cached primitive boundary state (ρ, u, v, p, E).
///
/// E is the total energy per unit volume consistent with the other four,
/// precomputed so the imprint loop does no thermodynamics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimitiveState {
    /// Density.
    pub rho: f64,
    /// x-velocity.
    pub u: f64,
    /// y-velocity.
    pub v: f64,
    /// Static pressure.
    pub p: f64,
    /// Total energy per unit volume.
    pub e: f64,
}

impl PrimitiveState {
    /// Build from (ρ, u, v, p), deriving the energy.
    pub fn new(rho: f64, u: f64, v: f64, p: f64, eq: &Euler2D) -> Self {
        Self {
            rho,
            u,
            v,
            p,
            e: eq.energy(rho, u, v, p),
        }
    }

    /// The conservative 4-tuple of this state.
    #[inline(always)]
    pub fn to_conserved(&self) -> EulerState2D {
        EulerState2D {
            rho: self.rho,
            rho_u: self.rho * self.u,
            rho_v: self.rho * self.v,
            rho_e: self.e,
        }
    }
}

/// User-facing chamber parameters (p_total, T_total, M, p_ambient).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChamberConditions {
    /// Stagnation pressure in the chamber, Pa.
    pub p_total: f64,
    /// Stagnation temperature in the chamber, K.
    pub t_total: f64,
    /// Design inlet Mach number.
    pub mach: f64,
    /// Ambient static pressure, Pa.
    pub p_ambient: f64,
}

impl Default for ChamberConditions {
    /// Default underexpanded-jet configuration (NPR ≈ 3.45).
    fn default() -> Self {
        Self {
            p_total: 350_000.0,
            t_total: 1000.0,
            mach: 2.0,
            p_ambient: 101_325.0,
        }
    }
}

impl ChamberConditions {
    /// Validate the parameter set.
    ///
    /// Thermodynamic inputs must be strictly positive and the Mach number
    /// non-negative; rejection happens before any solver state changes.
    pub fn validate(&self) -> Result<(), SolverError> {
        for (name, value) in [
            ("p_total", self.p_total),
            ("t_total", self.t_total),
            ("p_ambient", self.p_ambient),
        ] {
            if !(value > 0.0) {
                return Err(SolverError::NonPositiveParameter { name, value });
            }
        }
        if !(self.mach >= 0.0) {
            return Err(SolverError::NegativeMach(self.mach));
        }
        Ok(())
    }

    /// Nozzle pressure ratio p_total/p_ambient.
    pub fn npr(&self) -> f64 {
        self.p_total / self.p_ambient
    }

    /// Inlet static state from the isentropic relations.
    pub fn inlet_state(&self, eq: &Euler2D) -> PrimitiveState {
        let m2 = self.mach * self.mach;
        let ratio = 1.0 + 0.5 * (eq.gamma - 1.0) * m2;

        let t_static = self.t_total / ratio;
        let p_static = self.p_total / ratio.powf(eq.gamma / (eq.gamma - 1.0));
        let rho_static = p_static / (eq.r_gas * t_static);
        let c_static = (eq.gamma * eq.r_gas * t_static).sqrt();
        let u_static = self.mach * c_static;

        PrimitiveState::new(rho_static, u_static, 0.0, p_static, eq)
    }

    /// Quiescent ambient state at [`T_AMBIENT`] and the ambient pressure.
    pub fn ambient_state(&self, eq: &Euler2D) -> PrimitiveState {
        let rho = self.p_ambient / (eq.r_gas * T_AMBIENT);
        PrimitiveState::new(rho, 0.0, 0.0, self.p_ambient, eq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::R_GAS;

    const TOL: f64 = 1e-10;

    #[test]
    fn test_inlet_state_mach_two() {
        let eq = Euler2D::default();
        let chamber = ChamberConditions::default();
        let inlet = chamber.inlet_state(&eq);

        // 1 + 0.2·M² = 1.8 at M = 2.
        let t_static = 1000.0 / 1.8;
        let p_static = 350_000.0 / 1.8f64.powf(3.5);
        let rho_static = p_static / (R_GAS * t_static);
        let u_static = 2.0 * (1.4 * R_GAS * t_static).sqrt();

        assert!((inlet.p - p_static).abs() < TOL * p_static);
        assert!((inlet.rho - rho_static).abs() < TOL * rho_static);
        assert!((inlet.u - u_static).abs() < TOL * u_static);
        assert!(inlet.v.abs() < TOL);
        assert!((inlet.e - eq.energy(rho_static, u_static, 0.0, p_static)).abs() < TOL * inlet.e);
    }

    #[test]
    fn test_inlet_state_mach_zero_is_stagnation() {
        // At M = 0 the static state equals the total state.
        let eq = Euler2D::default();
        let chamber = ChamberConditions {
            p_total: 101_325.0,
            t_total: 300.0,
            mach: 0.0,
            p_ambient: 101_325.0,
        };
        let inlet = chamber.inlet_state(&eq);

        assert!((inlet.p - 101_325.0).abs() < TOL * 101_325.0);
        assert!((inlet.rho - 101_325.0 / (R_GAS * 300.0)).abs() < TOL);
        assert!(inlet.u.abs() < TOL);

        // And it coincides with the ambient state at matched pressure.
        let ambient = chamber.ambient_state(&eq);
        assert!((inlet.rho - ambient.rho).abs() < TOL);
        assert!((inlet.e - ambient.e).abs() < TOL * ambient.e);
    }

    #[test]
    fn test_ambient_state() {
        let eq = Euler2D::default();
        let chamber = ChamberConditions::default();
        let ambient = chamber.ambient_state(&eq);

        assert!((ambient.rho - 101_325.0 / (R_GAS * 300.0)).abs() < TOL);
        assert!(ambient.u.abs() < TOL);
        assert!(ambient.v.abs() < TOL);
        // Quiescent: E is pure internal energy.
        assert!((ambient.e - 101_325.0 / 0.4).abs() < TOL * ambient.e);
    }

    #[test]
    fn test_inlet_supersonic_exceeds_sound_speed() {
        let eq = Euler2D::default();
        let chamber = ChamberConditions::default();
        let inlet = chamber.inlet_state(&eq);

        let c = eq.sound_speed(inlet.rho, inlet.p);
        assert!((inlet.u / c - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let base = ChamberConditions::default();

        let bad = ChamberConditions { p_total: 0.0, ..base };
        assert!(matches!(
            bad.validate(),
            Err(SolverError::NonPositiveParameter { name: "p_total", .. })
        ));

        let bad = ChamberConditions { t_total: -5.0, ..base };
        assert!(matches!(
            bad.validate(),
            Err(SolverError::NonPositiveParameter { name: "t_total", .. })
        ));

        let bad = ChamberConditions { p_ambient: f64::NAN, ..base };
        assert!(bad.validate().is_err());

        let bad = ChamberConditions { mach: -0.1, ..base };
        assert!(matches!(bad.validate(), Err(SolverError::NegativeMach(_))));

        assert!(base.validate().is_ok());
    }

    #[test]
    fn test_npr() {
        let chamber = ChamberConditions::default();
        assert!((chamber.npr() - 350_000.0 / 101_325.0).abs() < TOL);
    }

    #[test]
    fn test_primitive_to_conserved() {
        let eq = Euler2D::default();
        let state = PrimitiveState::new(1.2, 100.0, -20.0, 101_325.0, &eq);
        let q = state.to_conserved();

        assert!((q.rho - 1.2).abs() < TOL);
        assert!((q.rho_u - 120.0).abs() < TOL);
        assert!((q.rho_v - (-24.0)).abs() < TOL);
        assert!((q.rho_e - state.e).abs() < TOL);

        // Round-trip through the gas model.
        assert!((eq.pressure(&q) - 101_325.0).abs() < 1e-8 * 101_325.0);
    }
}
