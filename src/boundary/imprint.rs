//! Fixed jet boundary conditions, imprinted on the tentative field after
//! the sweeps and before positivity repair.
//!
//! Layout of the rectangular domain:
//! - **Left column**: supersonic inlet through a central aperture of
//!   half-width ⌊ny/8⌋ around ⌊ny/2⌋; slip wall elsewhere (no flow through
//!   the face, tangential motion preserved).
//! - **Right column**: zero-gradient outlet (copy of the neighbor column).
//! - **Top and bottom rows**: fixed ambient far field.
//!
//! The rows are written last so the four corner cells end up ambient.

use crate::boundary::chamber::PrimitiveState;
use crate::equations::Euler2D;
use crate::solver::field::EulerField2D;

/// Half-width of the inlet aperture in cells.
#[inline]
pub fn aperture_half_width(ny: usize) -> usize {
    ny / 8
}

/// Write the jet boundary conditions onto `field`.
///
/// The inlet aperture receives the cached inlet state verbatim. The rest
/// of the left column is a slip wall built from the `i = 1` neighbor:
/// density and y-momentum copied, x-momentum zeroed, and the energy
/// rebuilt so the neighbor's pressure is preserved under the zeroed
/// normal velocity.
pub fn apply_jet_boundary(
    field: &mut EulerField2D,
    inlet: &PrimitiveState,
    ambient: &PrimitiveState,
    eq: &Euler2D,
) {
    let nx = field.nx();
    let ny = field.ny();
    let j_center = ny / 2;
    let r = aperture_half_width(ny);

    // Inlet column: aperture or slip wall.
    let inlet_q = inlet.to_conserved();
    for j in 0..ny {
        if j.abs_diff(j_center) <= r {
            field.set_state(0, j, inlet_q);
        } else {
            let neighbor = field.get_state(1, j);
            let p = eq.pressure(&neighbor);
            let mut wall = neighbor;
            wall.rho_u = 0.0;
            wall.rho_e =
                p / (eq.gamma - 1.0) + 0.5 * wall.rho_v * wall.rho_v / wall.rho;
            field.set_state(0, j, wall);
        }
    }

    // Outlet column: zero-gradient.
    for j in 0..ny {
        let q = field.get_state(nx - 2, j);
        field.set_state(nx - 1, j, q);
    }

    // Far-field rows: hard-set ambient. Written last so corners are ambient.
    let ambient_q = ambient.to_conserved();
    for i in 0..nx {
        field.set_state(i, 0, ambient_q);
        field.set_state(i, ny - 1, ambient_q);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::chamber::ChamberConditions;
    use crate::equations::EulerState2D;

    const TOL: f64 = 1e-6;

    fn close(a: &EulerState2D, b: &EulerState2D, tol: f64) -> bool {
        (a.rho - b.rho).abs() <= tol * b.rho.abs().max(1.0)
            && (a.rho_u - b.rho_u).abs() <= tol * b.rho_u.abs().max(1.0)
            && (a.rho_v - b.rho_v).abs() <= tol * b.rho_v.abs().max(1.0)
            && (a.rho_e - b.rho_e).abs() <= tol * b.rho_e.abs().max(1.0)
    }

    fn setup(nx: usize, ny: usize) -> (EulerField2D, PrimitiveState, PrimitiveState, Euler2D) {
        let eq = Euler2D::default();
        let chamber = ChamberConditions::default();
        let inlet = chamber.inlet_state(&eq);
        let ambient = chamber.ambient_state(&eq);
        let mut field = EulerField2D::new(nx, ny);
        field.fill(ambient.to_conserved());
        (field, inlet, ambient, eq)
    }

    #[test]
    fn test_aperture_geometry() {
        // ny = 16: center 8, half-width 2 → rows 6..=10 are inlet.
        let (mut field, inlet, ambient, eq) = setup(12, 16);
        apply_jet_boundary(&mut field, &inlet, &ambient, &eq);

        let inlet_q = inlet.to_conserved();
        for j in 0..16usize {
            let q = field.get_state(0, j);
            if (6..=10).contains(&j) {
                assert!(close(&q, &inlet_q, TOL), "row {} should be inlet", j);
            } else if j != 0 && j != 15 {
                assert!(
                    q.rho_u.abs() < TOL,
                    "wall row {} should have zero x-momentum",
                    j
                );
            }
        }
    }

    #[test]
    fn test_slip_wall_formula() {
        let (mut field, inlet, ambient, eq) = setup(12, 16);

        // Give the neighbor column a distinctive moving state.
        let moving = EulerState2D::from_primitives(0.9, 150.0, 60.0, 80_000.0, eq.gamma);
        for j in 0..16 {
            field.set_state(1, j, moving);
        }
        apply_jet_boundary(&mut field, &inlet, &ambient, &eq);

        // Row 2 is wall (outside the 6..=10 aperture).
        let wall = field.get_state(0, 2);
        assert!((wall.rho - moving.rho).abs() < TOL);
        assert!(wall.rho_u.abs() < TOL);
        assert!((wall.rho_v - moving.rho_v).abs() < 1e-3);

        // Pressure of the wall state equals the neighbor's, with u = 0.
        let p_wall = eq.pressure(&wall);
        assert!((p_wall - 80_000.0).abs() < 1.0);
    }

    #[test]
    fn test_outlet_copies_neighbor_column() {
        let (mut field, inlet, ambient, eq) = setup(12, 16);
        let probe = EulerState2D::from_primitives(1.4, 220.0, -15.0, 120_000.0, eq.gamma);
        for j in 0..16 {
            field.set_state(10, j, probe);
        }
        apply_jet_boundary(&mut field, &inlet, &ambient, &eq);

        for j in 1..15 {
            let q = field.get_state(11, j);
            assert!(close(&q, &probe, 1e-6), "outlet row {} should copy i = nx-2", j);
        }
    }

    #[test]
    fn test_far_field_rows_and_corners_ambient() {
        let (mut field, inlet, ambient, eq) = setup(12, 16);
        apply_jet_boundary(&mut field, &inlet, &ambient, &eq);

        let ambient_q = ambient.to_conserved();
        for i in 0..12 {
            assert!(close(&field.get_state(i, 0), &ambient_q, TOL));
            assert!(close(&field.get_state(i, 15), &ambient_q, TOL));
        }
    }

    #[test]
    fn test_aperture_symmetric_for_odd_ny() {
        // ny = 25: center 12, half-width 3 → rows 9..=15, symmetric under
        // j ↔ 24 − j.
        let (mut field, inlet, ambient, eq) = setup(12, 25);
        apply_jet_boundary(&mut field, &inlet, &ambient, &eq);

        let inlet_q = inlet.to_conserved();
        for j in 0..25usize {
            let is_inlet = close(&field.get_state(0, j), &inlet_q, TOL);
            let mirrored = close(&field.get_state(0, 24 - j), &inlet_q, TOL);
            assert_eq!(is_inlet, mirrored, "aperture asymmetric at row {}", j);
            assert_eq!(is_inlet, (9..=15).contains(&j));
        }
    }
}
