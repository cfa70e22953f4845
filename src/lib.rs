//! # euler-rs
//!
//! A finite-volume compressible Euler solver core for a real-time 2D
//! supersonic jet simulator.
//!
//! The crate provides the building blocks of the solver pipeline:
//! - Conservative/primitive algebra for the γ-law gas (equations)
//! - Roe approximate Riemann flux with Harten's entropy fix (flux)
//! - Chamber-conditioned inlet/ambient states and the jet boundary
//!   imprint (boundary)
//! - Double-buffered field, directional sweeps, CFL time stepping,
//!   positivity repair, and scalar projections (solver)
//! - Frame pacing for an external animation driver (simulation)
//!
//! The entry point is [`FluidSolver`]: construct it on a grid, feed it
//! [`ChamberConditions`], call [`FluidSolver::step`] from the driver, and
//! read [`FluidSolver::scalar_field`] for visualization. A diverging step
//! resets the flow to ambient instead of failing; invalid inputs are
//! rejected at the entry points with [`SolverError`].
//!
//! ```no_run
//! use euler_rs::{ChamberConditions, FluidSolver, ScalarMode};
//!
//! let mut solver = FluidSolver::new(300, 150)?;
//! solver.update_boundary(ChamberConditions::default())?;
//! solver.reset();
//!
//! for _ in 0..100 {
//!     solver.step(0.5);
//! }
//! let mach = solver.scalar_field(ScalarMode::Mach);
//! assert_eq!(mach.values.len(), 300 * 150);
//! # Ok::<(), euler_rs::SolverError>(())
//! ```

pub mod boundary;
pub mod equations;
pub mod error;
pub mod flux;
pub mod simulation;
pub mod solver;

// Re-export the main types for convenience.
pub use boundary::{apply_jet_boundary, ChamberConditions, PrimitiveState, T_AMBIENT};
pub use equations::{Euler2D, EulerState2D, GAMMA, R_GAS};
pub use error::SolverError;
pub use flux::roe_flux_euler_2d;
pub use simulation::{JetParameters, StepPacer, MAX_STEPS_PER_FRAME};
pub use solver::{
    compute_dt, max_wave_speed, scalar_field, EulerField2D, FluidSolver, ScalarField, ScalarMode,
    DOMAIN_LENGTH, DT_MAX, MIN_GRID, P_MIN, RHO_MIN, WAVE_SPEED_FLOOR,
};
