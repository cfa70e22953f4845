//! Conservative-variable field storage.
//!
//! The field is a flat, single-precision buffer of nx·ny cells with four
//! components each, flattened row-major: cell (i, j) lives at
//! `(j·nx + i)·4`. Loads widen to `f64` for arithmetic and stores narrow
//! back; the solver owns two congruent buffers (committed and tentative)
//! allocated once at construction.

use crate::equations::EulerState2D;

/// A 2D field of conservative 4-tuples in single precision.
#[derive(Clone, Debug, PartialEq)]
pub struct EulerField2D {
    nx: usize,
    ny: usize,
    data: Vec<f32>,
}

impl EulerField2D {
    /// Allocate a zero-filled field of `nx × ny` cells.
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            data: vec![0.0; nx * ny * 4],
        }
    }

    /// Number of cells in x.
    #[inline(always)]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of cells in y.
    #[inline(always)]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Flat offset of cell (i, j).
    #[inline(always)]
    fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny);
        (j * self.nx + i) * 4
    }

    /// Read the conservative state of cell (i, j), widened to `f64`.
    #[inline(always)]
    pub fn get_state(&self, i: usize, j: usize) -> EulerState2D {
        let b = self.offset(i, j);
        EulerState2D {
            rho: self.data[b] as f64,
            rho_u: self.data[b + 1] as f64,
            rho_v: self.data[b + 2] as f64,
            rho_e: self.data[b + 3] as f64,
        }
    }

    /// Write the conservative state of cell (i, j), narrowed to `f32`.
    #[inline(always)]
    pub fn set_state(&mut self, i: usize, j: usize, q: EulerState2D) {
        let b = self.offset(i, j);
        self.data[b] = q.rho as f32;
        self.data[b + 1] = q.rho_u as f32;
        self.data[b + 2] = q.rho_v as f32;
        self.data[b + 3] = q.rho_e as f32;
    }

    /// Accumulate `scale · q` into cell (i, j).
    ///
    /// Each component is widened, updated in `f64`, and narrowed back, so
    /// a pair of equal-and-opposite applications is conservative to
    /// storage precision.
    #[inline(always)]
    pub fn add_scaled(&mut self, i: usize, j: usize, q: &EulerState2D, scale: f64) {
        let b = self.offset(i, j);
        self.data[b] = (self.data[b] as f64 + scale * q.rho) as f32;
        self.data[b + 1] = (self.data[b + 1] as f64 + scale * q.rho_u) as f32;
        self.data[b + 2] = (self.data[b + 2] as f64 + scale * q.rho_v) as f32;
        self.data[b + 3] = (self.data[b + 3] as f64 + scale * q.rho_e) as f32;
    }

    /// Fill every cell with the same state.
    pub fn fill(&mut self, q: EulerState2D) {
        let cell = [q.rho as f32, q.rho_u as f32, q.rho_v as f32, q.rho_e as f32];
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&cell);
        }
    }

    /// Copy another congruent field into this one.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.data.len(), other.data.len());
        self.data.copy_from_slice(&other.data);
    }

    /// Raw component buffer.
    #[inline(always)]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable raw component buffer.
    #[inline(always)]
    pub(crate) fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}
