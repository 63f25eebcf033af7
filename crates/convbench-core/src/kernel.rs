//! Convolution kernels.
//!
//! A kernel is a small row-major grid of raw f32 weights. No normalization
//! is applied; callers wanting a true (flipped) convolution pre-flip their
//! weights, since the engine computes cross-correlation.

use thiserror::Error;

/// Errors produced when constructing a [`Kernel`].
#[derive(Error, Debug)]
pub enum KernelError {
    #[error("kernel dimensions must be at least 1x1 (got {rows}x{cols})")]
    EmptyDimensions { rows: usize, cols: usize },

    #[error("invalid kernel weight count (expected {expected}, got {got})")]
    InvalidWeightCount { expected: usize, got: usize },
}

/// Immutable row-major weight grid, shared read-only across channels and
/// benchmark repetitions.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    rows: usize,
    cols: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Construct a kernel, validating shape and weight count.
    pub fn new(rows: usize, cols: usize, weights: Vec<f32>) -> Result<Self, KernelError> {
        if rows == 0 || cols == 0 {
            return Err(KernelError::EmptyDimensions { rows, cols });
        }
        if weights.len() != rows * cols {
            return Err(KernelError::InvalidWeightCount {
                expected: rows * cols,
                got: weights.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            weights,
        })
    }

    /// The default 3×3 identity kernel: a single center weight of 1.0.
    pub fn identity() -> Self {
        let mut weights = vec![0.0; 9];
        weights[4] = 1.0;
        Self {
            rows: 3,
            cols: 3,
            weights,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Flattened row-major weights.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weights of kernel row `kr`.
    #[inline]
    pub fn row(&self, kr: usize) -> &[f32] {
        let start = kr * self.cols;
        &self.weights[start..start + self.cols]
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::identity()
    }
}
