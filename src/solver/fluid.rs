//! The fluid solver: double-buffered field, simulation clock, cached
//! boundary states, and the per-step pipeline.
//!
//! One call to [`FluidSolver::step`] is the atomic unit of advancement:
//!
//! 1. CFL-limited `dt` from the committed field; the clock advances.
//! 2. Tentative buffer seeded from the committed one.
//! 3. X-sweep on the committed field, then Y-sweep on the intermediate
//!    it produced (accumulating into the same buffer, no re-seed).
//! 4. Boundary imprint on the tentative buffer.
//! 5. Positivity repair and stability verdict.
//! 6. Commit on success; on divergence the committed field is refilled
//!    with ambient and the clock keeps its advanced value, so the viewer
//!    sees the flow restart without the simulation time resetting.
//!
//! Divergence is not surfaced as an error: the core backs a
//! visualization, which restarts rather than stalls. Parameter updates
//! happen strictly between steps, so a step sees one consistent pair of
//! cached boundary states.

use log::warn;

use crate::boundary::{apply_jet_boundary, ChamberConditions, PrimitiveState};
use crate::equations::{Euler2D, EulerState2D};
use crate::error::SolverError;
use crate::solver::field::EulerField2D;
use crate::solver::fields::{scalar_field, ScalarField, ScalarMode};
use crate::solver::positivity::repair_field;
use crate::solver::sweep;

/// Physical length of the domain in x, meters.
pub const DOMAIN_LENGTH: f64 = 0.9;

/// Minimum grid extent per axis.
pub const MIN_GRID: usize = 4;

/// Construction-time ambient fill: sea-level standard density and
/// pressure. Distinct from the 300 K ambient state computed from the
/// chamber parameters, which takes over at the first reset.
const DEFAULT_RHO: f64 = 1.225;
const DEFAULT_P: f64 = 101_325.0;

/// CFL number substituted when `step` receives a non-finite or
/// non-positive value.
const FALLBACK_CFL: f64 = 0.5;

/// Compressible Euler solver on a fixed rectangular grid.
pub struct FluidSolver {
    eq: Euler2D,
    q: EulerField2D,
    q_next: EulerField2D,
    chamber: ChamberConditions,
    inlet: PrimitiveState,
    ambient: PrimitiveState,
    dx: f64,
    dy: f64,
    t: f64,
}

impl FluidSolver {
    /// Create a solver on an `nx × ny` grid of square cells.
    ///
    /// The field is filled with the default ambient state and the chamber
    /// parameter cache is seeded with the default underexpanded-jet
    /// configuration, so stepping is well-defined immediately.
    ///
    /// # Errors
    /// [`SolverError::GridTooSmall`] if either extent is below 4.
    pub fn new(nx: usize, ny: usize) -> Result<Self, SolverError> {
        if nx < MIN_GRID || ny < MIN_GRID {
            return Err(SolverError::GridTooSmall { nx, ny });
        }

        let eq = Euler2D::default();
        let chamber = ChamberConditions::default();
        let inlet = chamber.inlet_state(&eq);
        let ambient = chamber.ambient_state(&eq);

        let dx = DOMAIN_LENGTH / nx as f64;
        let mut q = EulerField2D::new(nx, ny);
        q.fill(EulerState2D::from_primitives(
            DEFAULT_RHO,
            0.0,
            0.0,
            DEFAULT_P,
            eq.gamma,
        ));
        let q_next = q.clone();

        Ok(Self {
            eq,
            q,
            q_next,
            chamber,
            inlet,
            ambient,
            dx,
            dy: dx,
            t: 0.0,
        })
    }

    /// Recompute the cached inlet and ambient states from new chamber
    /// parameters.
    ///
    /// Atomic with respect to stepping: either the old pair or the new
    /// pair is seen by any given step. Invalid parameters are rejected
    /// without touching solver state.
    pub fn update_boundary(&mut self, chamber: ChamberConditions) -> Result<(), SolverError> {
        chamber.validate()?;
        self.chamber = chamber;
        self.inlet = chamber.inlet_state(&self.eq);
        self.ambient = chamber.ambient_state(&self.eq);
        Ok(())
    }

    /// Rewind the clock and refill the field with the ambient state, then
    /// imprint the boundary conditions.
    pub fn reset(&mut self) {
        self.t = 0.0;
        self.q.fill(self.ambient.to_conserved());
        apply_jet_boundary(&mut self.q, &self.inlet, &self.ambient, &self.eq);
    }

    /// Advance one time step with the jet boundary conditions.
    pub fn step(&mut self, cfl: f64) {
        self.advance(cfl, false);
    }

    /// Advance one time step with all boundaries replaced by periodic
    /// wrap-around faces and no imprint.
    ///
    /// Diagnostic hook: with periodic faces the conserved totals are
    /// invariants of the sweep, which makes conservation checkable
    /// without boundary fluxes.
    pub fn step_periodic(&mut self, cfl: f64) {
        self.advance(cfl, true);
    }

    fn advance(&mut self, cfl: f64, periodic: bool) {
        let cfl = if cfl.is_finite() && cfl > 0.0 {
            cfl.min(1.0)
        } else {
            FALLBACK_CFL
        };

        let dt = sweep::compute_dt(&self.q, &self.eq, cfl, self.dx, self.dy);
        self.t += dt;

        self.q_next.copy_from(&self.q);

        #[cfg(not(feature = "parallel"))]
        sweep::x_sweep(&self.q, &mut self.q_next, &self.eq, dt / self.dx, periodic);
        #[cfg(feature = "parallel")]
        sweep::x_sweep_parallel(&self.q, &mut self.q_next, &self.eq, dt / self.dx, periodic);

        sweep::y_sweep(&mut self.q_next, &self.eq, dt / self.dy, periodic);

        if !periodic {
            apply_jet_boundary(&mut self.q_next, &self.inlet, &self.ambient, &self.eq);
        }

        if repair_field(&mut self.q_next, &self.eq) {
            self.q.copy_from(&self.q_next);
        } else {
            // Divergence: discard the tentative buffer, restart the flow
            // from quiescent ambient. The clock keeps its advanced value.
            warn!(
                "step rejected at t = {:.6e} s; field reset to ambient",
                self.t
            );
            self.q.fill(self.ambient.to_conserved());
        }
    }

    /// Project the committed field onto a visualization scalar.
    pub fn scalar_field(&self, mode: ScalarMode) -> ScalarField {
        scalar_field(&self.q, &self.eq, mode)
    }

    /// Accumulated simulation time, seconds.
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Number of cells in x.
    pub fn nx(&self) -> usize {
        self.q.nx()
    }

    /// Number of cells in y.
    pub fn ny(&self) -> usize {
        self.q.ny()
    }

    /// Cell width, meters.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Committed conservative state of cell (i, j).
    ///
    /// # Panics
    /// If (i, j) is outside the grid.
    pub fn state_at(&self, i: usize, j: usize) -> EulerState2D {
        assert!(i < self.nx() && j < self.ny(), "cell index out of range");
        self.q.get_state(i, j)
    }

    /// Cached inlet state.
    pub fn inlet_state(&self) -> &PrimitiveState {
        &self.inlet
    }

    /// Cached ambient state.
    pub fn ambient_state(&self) -> &PrimitiveState {
        &self.ambient
    }

    /// Current chamber parameters.
    pub fn chamber(&self) -> &ChamberConditions {
        &self.chamber
    }

    /// Total mass Σρ over all cells.
    pub fn total_mass(&self) -> f64 {
        self.component_total(0)
    }

    /// Total momentum (Σρu, Σρv) over all cells.
    pub fn total_momentum(&self) -> (f64, f64) {
        (self.component_total(1), self.component_total(2))
    }

    /// Total energy ΣρE over all cells.
    pub fn total_energy(&self) -> f64 {
        self.component_total(3)
    }

    fn component_total(&self, k: usize) -> f64 {
        self.q
            .data()
            .chunks_exact(4)
            .map(|c| c[k] as f64)
            .sum()
    }
}
