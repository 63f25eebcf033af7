//! Reader/writer for 24-bit uncompressed BMP files.
//!
//! The decoder reorders pixel rows into the engine's top-down, unpadded,
//! row-major channel layout and splits interleaved BGR into three planes.
//! The encoder re-applies bottom-up row order and 4-byte stride padding;
//! pad bytes are recomputed as zero, never preserved from the source.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use convbench_core::ChannelBuf;

use crate::error::BmpError;
use crate::header::{row_stride, BmpFileHeader, BmpInfoHeader};

/// Three channel planes of one decoded image, in BMP storage order.
#[derive(Clone, Debug)]
pub struct BmpPlanes {
    pub b: ChannelBuf,
    pub g: ChannelBuf,
    pub r: ChannelBuf,
}

impl BmpPlanes {
    /// Bundle three planes, checking that their dimensions agree.
    pub fn new(b: ChannelBuf, g: ChannelBuf, r: ChannelBuf) -> Result<Self, BmpError> {
        for plane in [&g, &r] {
            if plane.width != b.width || plane.height != b.height {
                return Err(BmpError::PlaneSizeMismatch(
                    b.width,
                    b.height,
                    plane.width,
                    plane.height,
                ));
            }
        }
        Ok(Self { b, g, r })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.b.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.b.height
    }
}

fn map_eof(err: std::io::Error, truncated: BmpError) -> BmpError {
    if err.kind() == ErrorKind::UnexpectedEof {
        truncated
    } else {
        BmpError::Io(err)
    }
}

/// Read a 24-bit uncompressed BMP into three channel planes.
///
/// Rows are stored bottom-up unless the info header carries a negative
/// height (top-down). Any other pixel format is rejected.
pub fn read_bmp(path: &Path) -> Result<BmpPlanes, BmpError> {
    let mut reader = BufReader::new(File::open(path)?);

    let mut file_bytes = [0u8; BmpFileHeader::SIZE];
    reader
        .read_exact(&mut file_bytes)
        .map_err(|e| map_eof(e, BmpError::TruncatedHeader))?;
    let file_header = BmpFileHeader::parse(&file_bytes)?;

    let mut info_bytes = [0u8; BmpInfoHeader::SIZE];
    reader
        .read_exact(&mut info_bytes)
        .map_err(|e| map_eof(e, BmpError::TruncatedHeader))?;
    let info = BmpInfoHeader::parse(&info_bytes);

    if info.bits_per_pixel != 24 || info.compression != 0 {
        return Err(BmpError::UnsupportedFormat {
            bits_per_pixel: info.bits_per_pixel,
            compression: info.compression,
        });
    }
    if info.width <= 0 || info.height == 0 {
        return Err(BmpError::InvalidDimensions {
            width: info.width as i64,
            height: info.height as i64,
        });
    }

    let width = info.width as usize;
    let height = info.height.unsigned_abs() as usize;
    let top_down = info.height < 0;

    reader.seek(SeekFrom::Start(file_header.data_offset as u64))?;

    let stride = row_stride(width);
    let mut row = vec![0u8; stride];
    let mut b = ChannelBuf::new(width, height);
    let mut g = ChannelBuf::new(width, height);
    let mut r = ChannelBuf::new(width, height);

    for i in 0..height {
        reader
            .read_exact(&mut row)
            .map_err(|e| map_eof(e, BmpError::TruncatedPixelData))?;
        let y = if top_down { i } else { height - 1 - i };
        let b_row = b.row_mut(y);
        let g_row = g.row_mut(y);
        let r_row = r.row_mut(y);
        for (x, px) in row[..width * 3].chunks_exact(3).enumerate() {
            b_row[x] = px[0];
            g_row[x] = px[1];
            r_row[x] = px[2];
        }
    }

    Ok(BmpPlanes { b, g, r })
}

/// Write three channel planes as a 24-bit uncompressed bottom-up BMP.
pub fn write_bmp(path: &Path, planes: &BmpPlanes) -> Result<(), BmpError> {
    for plane in [&planes.g, &planes.r] {
        if plane.width != planes.width() || plane.height != planes.height() {
            return Err(BmpError::PlaneSizeMismatch(
                planes.width(),
                planes.height(),
                plane.width,
                plane.height,
            ));
        }
    }

    let width = planes.width();
    let height = planes.height();
    let stride = row_stride(width);
    let image_size = (stride * height) as u32;
    let data_offset = (BmpFileHeader::SIZE + BmpInfoHeader::SIZE) as u32;

    let file_header = BmpFileHeader {
        file_size: data_offset + image_size,
        data_offset,
    };
    let info = BmpInfoHeader::new_bgr24(width, height, image_size);

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&file_header.to_bytes())?;
    writer.write_all(&info.to_bytes())?;

    let mut row = vec![0u8; stride];
    for y in (0..height).rev() {
        let b_row = planes.b.row(y);
        let g_row = planes.g.row(y);
        let r_row = planes.r.row(y);
        for (x, px) in row[..width * 3].chunks_exact_mut(3).enumerate() {
            px[0] = b_row[x];
            px[1] = g_row[x];
            px[2] = r_row[x];
        }
        writer.write_all(&row)?;
    }
    writer.flush()?;

    Ok(())
}
