//! Commit-time positivity repair and stability verdict.
//!
//! After the sweeps and the boundary imprint, every cell of the tentative
//! field is checked and, where possible, repaired:
//!
//! - non-finite density or energy ⇒ the step is rejected;
//! - ρ below the floor ⇒ density clamped, both momenta zeroed;
//! - non-finite velocity ⇒ the step is rejected;
//! - pressure below the floor (or non-finite) ⇒ energy rewritten so the
//!   equation of state yields exactly the floor at the current velocity.
//!
//! These floors are stricter than the evaluation-time guards
//! in [`crate::equations`] and [`crate::flux`]: arithmetic is permissive,
//! the committed field is not.

use crate::equations::Euler2D;
use crate::solver::field::EulerField2D;

/// Committed-field density floor.
pub const RHO_MIN: f64 = 0.05;

/// Committed-field pressure floor.
pub const P_MIN: f64 = 100.0;

/// Repair the tentative field in place.
///
/// Returns `true` if every cell could be brought onto the invariant
/// manifold (ρ ≥ [`RHO_MIN`], p ≥ [`P_MIN`], all components finite), and
/// `false` if an unrecoverable non-finite value was found, in which case
/// the caller must discard the buffer.
pub fn repair_field(field: &mut EulerField2D, eq: &Euler2D) -> bool {
    let nx = field.nx();
    let ny = field.ny();

    for j in 0..ny {
        for i in 0..nx {
            let mut q = field.get_state(i, j);

            if !q.rho.is_finite() || !q.rho_e.is_finite() {
                return false;
            }

            if q.rho < RHO_MIN {
                q.rho = RHO_MIN;
                q.rho_u = 0.0;
                q.rho_v = 0.0;
            }

            let u = q.rho_u / q.rho;
            let v = q.rho_v / q.rho;
            if !u.is_finite() || !v.is_finite() {
                return false;
            }

            let p = eq.pressure(&q);
            if !p.is_finite() || p < P_MIN {
                q.rho_e = eq.energy(q.rho, u, v, P_MIN);
            }

            field.set_state(i, j, q);
        }
    }

    true
}
