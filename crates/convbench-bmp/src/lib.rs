//! Fixed-layout reader/writer for 24-bit uncompressed BMP images.
//!
//! This crate is the file-format collaborator of the `convbench` tool:
//! it decodes a BMP into three planar [`convbench_core::ChannelBuf`]s and
//! encodes three planes back. Anything other than 24-bit uncompressed
//! pixel data is rejected up front.

mod codec;
mod error;
mod header;

pub use codec::{read_bmp, write_bmp, BmpPlanes};
pub use error::BmpError;
pub use header::{row_stride, BmpFileHeader, BmpInfoHeader};
