//! Core types and the convolution engine for the `convbench` tool.
//!
//! This crate is intentionally small and purely numeric. It does *not*
//! know about image file formats or the CLI; it models one color channel
//! as a flat row-major buffer and filters it with a raw-weight kernel.

mod convolve;
mod image;
mod kernel;
mod logger;
mod stats;

pub use convolve::{convolve, convolve_into, output_dims, ParallelOptions};
pub use image::{ChannelBuf, ChannelError, ChannelView};
pub use kernel::{Kernel, KernelError};
pub use logger::init_with_level;
pub use stats::TimingStats;
