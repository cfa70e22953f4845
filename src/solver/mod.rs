//! Finite-volume solver: field storage, sweeps, positivity, projections,
//! and the [`FluidSolver`] facade.

pub mod field;
pub mod fields;
pub mod fluid;
pub mod positivity;
pub mod sweep;

pub use field::EulerField2D;
pub use fields::{scalar_field, ScalarField, ScalarMode};
pub use fluid::{FluidSolver, DOMAIN_LENGTH, MIN_GRID};
pub use positivity::{repair_field, P_MIN, RHO_MIN};
pub use sweep::{compute_dt, max_wave_speed, DT_MAX, WAVE_SPEED_FLOOR};
