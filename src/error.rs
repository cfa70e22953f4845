//! Error types for solver construction and parameter updates.
//!
//! Divergence during time stepping is *not* an error: the
//! solver recovers by resetting the field to ambient (see
//! [`crate::solver::FluidSolver::step`]). Errors exist only at the entry
//! points, where invalid input must be rejected before any state mutation.

use thiserror::Error;

/// Error type for solver entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// Grid dimensions below the minimum resolvable size.
    #[error("grid too small: {nx}x{ny} (minimum 4x4)")]
    GridTooSmall {
        /// Requested number of cells in x.
        nx: usize,
        /// Requested number of cells in y.
        ny: usize,
    },

    /// A thermodynamic chamber parameter that must be strictly positive.
    #[error("chamber parameter `{name}` must be positive, got {value}")]
    NonPositiveParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Inlet Mach number below zero.
    #[error("inlet Mach number must be non-negative, got {0}")]
    NegativeMach(f64),
}
