//! Boundary model: chamber-conditioned inlet/ambient states and the
//! per-step boundary imprint.

pub mod chamber;
pub mod imprint;

pub use chamber::{ChamberConditions, PrimitiveState, T_AMBIENT};
pub use imprint::apply_jet_boundary;
