//! Conservation-law definitions.

pub mod euler_2d;

pub use euler_2d::{Euler2D, EulerState2D, GAMMA, R_GAS};
