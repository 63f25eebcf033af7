use thiserror::Error;

/// Errors produced while reading or writing BMP files.
#[derive(Error, Debug)]
pub enum BmpError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("truncated BMP header")]
    TruncatedHeader,

    #[error("bad BMP signature (expected 'BM')")]
    BadSignature,

    #[error("only 24-bit uncompressed BMP files are supported (got {bits_per_pixel} bpp, compression {compression})")]
    UnsupportedFormat {
        bits_per_pixel: u16,
        compression: u32,
    },

    #[error("invalid BMP dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("truncated BMP pixel data")]
    TruncatedPixelData,

    #[error("channel planes disagree in size ({0}x{1} vs {2}x{3})")]
    PlaneSizeMismatch(usize, usize, usize, usize),
}
