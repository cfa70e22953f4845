//! Numerical fluxes.

pub mod roe;

pub use roe::roe_flux_euler_2d;
