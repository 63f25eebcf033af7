//! Valid-mode 2D cross-correlation over 8-bit channel buffers.
//!
//! - Output extent is `(h - kr + 1) × (w - kc + 1)`; the input is never
//!   padded and edges never wrap.
//! - Accumulation is f32 in row-major window order (inner loop over kernel
//!   columns, outer over kernel rows). Both execution paths go through the
//!   same scalar row routine, so results are byte-identical for any worker
//!   count.
//! - Each sample is clamped to [0, 255] and rounded half-up before
//!   narrowing to u8.

use crate::image::{ChannelBuf, ChannelView};
use crate::kernel::Kernel;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Controls whether the engine fans output rows out to Rayon.
#[derive(Clone, Copy, Debug)]
pub struct ParallelOptions {
    enabled: bool,
    min_rows_for_parallel: usize,
}

impl ParallelOptions {
    /// Construct explicit options.
    pub fn new(enabled: bool, min_rows_for_parallel: usize) -> Self {
        Self {
            enabled,
            min_rows_for_parallel: min_rows_for_parallel.max(1),
        }
    }

    /// Disable parallel execution regardless of output size.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            min_rows_for_parallel: usize::MAX,
        }
    }

    /// Returns true when the row fan-out should be used for `out_rows`.
    pub fn should_parallelize(&self, out_rows: usize) -> bool {
        self.enabled && out_rows >= self.min_rows_for_parallel
    }
}

impl Default for ParallelOptions {
    fn default() -> Self {
        Self {
            enabled: cfg!(feature = "parallel"),
            min_rows_for_parallel: 64,
        }
    }
}

/// Valid-mode output extent `(width, height)` for `input` filtered by
/// `kernel`.
#[inline]
pub fn output_dims(input: &ChannelView<'_>, kernel: &Kernel) -> (usize, usize) {
    (
        input.width - kernel.cols() + 1,
        input.height - kernel.rows() + 1,
    )
}

/// Convolve `input` with `kernel`, writing into the reusable `out` buffer.
///
/// `out` is resized to the valid-mode extent before any row is computed;
/// its previous contents are discarded. Passing the same buffer across
/// repeated calls avoids per-iteration reallocation in benchmark loops.
///
/// The kernel must not exceed the input in either dimension; callers
/// validate this before handing work to the engine.
pub fn convolve_into(
    input: ChannelView<'_>,
    kernel: &Kernel,
    out: &mut ChannelBuf,
    parallel: ParallelOptions,
) {
    assert!(
        input.width >= kernel.cols() && input.height >= kernel.rows(),
        "kernel ({}x{}) exceeds image extent ({}x{})",
        kernel.rows(),
        kernel.cols(),
        input.height,
        input.width
    );

    let (out_w, out_h) = output_dims(&input, kernel);
    out.resize(out_w, out_h);

    if parallel.should_parallelize(out_h) {
        #[cfg(feature = "parallel")]
        {
            out.data
                .par_chunks_mut(out_w)
                .enumerate()
                .for_each(|(i, out_row)| convolve_row(&input, kernel, i, out_row));
            return;
        }
    }

    for i in 0..out_h {
        convolve_row(&input, kernel, i, out.row_mut(i));
    }
}

/// Convolve into a freshly allocated buffer with default parallel options.
pub fn convolve(input: ChannelView<'_>, kernel: &Kernel) -> ChannelBuf {
    let mut out = ChannelBuf::default();
    convolve_into(input, kernel, &mut out, ParallelOptions::default());
    out
}

/// Compute one output row. Shared by the sequential and parallel paths:
/// the accumulation order here is the reproducibility contract.
#[inline]
fn convolve_row(input: &ChannelView<'_>, kernel: &Kernel, i: usize, out_row: &mut [u8]) {
    for (j, out_px) in out_row.iter_mut().enumerate() {
        let mut sum = 0.0f32;
        for kr in 0..kernel.rows() {
            let in_row = input.row(i + kr);
            for (kc, &w) in kernel.row(kr).iter().enumerate() {
                sum += in_row[j + kc] as f32 * w;
            }
        }
        let clamped = sum.clamp(0.0, 255.0);
        *out_px = (clamped + 0.5) as u8;
    }
}
