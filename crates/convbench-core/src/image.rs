//! Single-channel 8-bit image buffers in row-major layout.
//!
//! A color image is handled as three independent channel planes. The
//! borrowed [`ChannelView`] is what the convolution engine reads; the owned
//! [`ChannelBuf`] is what decoders produce and the engine writes into.

use thiserror::Error;

/// Errors produced when constructing channel buffers from raw data.
#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("invalid channel buffer length (expected {expected} bytes, got {got})")]
    InvalidLength { expected: usize, got: usize },
}

/// Borrowed read-only view of one color channel.
///
/// `data` is row-major with `len == width * height`; the sample at
/// `(x, y)` lives at index `y * width + x`.
#[derive(Clone, Copy, Debug)]
pub struct ChannelView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

impl<'a> ChannelView<'a> {
    /// Wrap a raw slice, checking that its length matches the dimensions.
    pub fn from_slice(data: &'a [u8], width: usize, height: usize) -> Result<Self, ChannelError> {
        if data.len() != width * height {
            return Err(ChannelError::InvalidLength {
                expected: width * height,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

/// Owned single-channel buffer, row-major, tightly packed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelBuf {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl ChannelBuf {
    /// Construct a zero-initialized buffer of size `width × height`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Take ownership of raw bytes, checking the length invariant.
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ChannelError> {
        if data.len() != width * height {
            return Err(ChannelError::InvalidLength {
                expected: width * height,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.width;
        let end = start + self.width;
        &mut self.data[start..end]
    }

    /// Borrow as a read-only [`ChannelView`].
    #[inline]
    pub fn as_view(&self) -> ChannelView<'_> {
        ChannelView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    /// Resize to `width × height`, reusing the backing allocation when the
    /// new extent fits. Contents after a resize are unspecified; callers
    /// overwrite every sample.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data.resize(width * height, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexing_is_row_major() {
        let mut buf = ChannelBuf::new(4, 3);
        buf.set(2, 1, 42);
        assert_eq!(buf.idx(2, 1), 6);
        assert_eq!(buf.data[6], 42);
        assert_eq!(buf.get(2, 1), 42);
        assert_eq!(buf.row(1)[2], 42);
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(ChannelBuf::from_vec(3, 3, vec![0; 9]).is_ok());
        let err = ChannelBuf::from_vec(3, 3, vec![0; 8]).unwrap_err();
        assert!(matches!(
            err,
            ChannelError::InvalidLength {
                expected: 9,
                got: 8
            }
        ));
    }

    #[test]
    fn view_matches_owned_buffer() {
        let buf = ChannelBuf::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let view = buf.as_view();
        assert_eq!(view.get(0, 1), 3);
        assert_eq!(view.row(1), &[3, 4]);
    }

    #[test]
    fn resize_keeps_length_invariant() {
        let mut buf = ChannelBuf::new(5, 5);
        buf.resize(3, 2);
        assert_eq!(buf.data.len(), 6);
        buf.resize(8, 4);
        assert_eq!(buf.data.len(), 32);
    }
}
