//! The grayscale TGA container: the fixed 18-byte header, the raw and
//! run-length pixel encodings, and the matching decoder.

use crate::raster::sample_grayscale;
use crate::rle::{pack_scanlines, unpack_scanlines};
use heightfield::grid::Heightfield;
use thiserror::Error;

/// Byte length of the fixed TGA header.
pub const HEADER_LEN: usize = 18;
/// Image-type byte for uncompressed grayscale.
pub const IMAGE_TYPE_GRAY: u8 = 3;
/// Image-type byte for run-length-encoded grayscale.
pub const IMAGE_TYPE_GRAY_RLE: u8 = 11;
/// Descriptor bit 5: rows stored top-to-bottom instead of bottom-up.
const DESCRIPTOR_TOP_LEFT: u8 = 0x20;

/// Pixel-data encoding of an exported image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TgaCompression {
    Uncompressed,
    RunLength,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TgaError {
    #[error("dimensions {width}x{height} do not fit the 16-bit header fields")]
    DimensionOverflow { width: usize, height: usize },
    #[error("pixel stream ends inside scanline {row} or a packet overruns it")]
    TruncatedStream { row: usize },
    #[error("not an 8-bit grayscale TGA: {reason}")]
    UnsupportedFormat { reason: String },
}

/// Render a heightfield and serialize it as a grayscale TGA byte stream.
///
/// A field with zero width or height serializes to a bare header.
pub fn encode_field(
    field: &Heightfield,
    compression: TgaCompression,
) -> Result<Vec<u8>, TgaError> {
    let pixels = sample_grayscale(field);
    encode_pixels(&pixels, field.width(), field.height(), compression)
}

/// Serialize an already-sampled grayscale buffer, `width * height` bytes in
/// row-major order, as a TGA byte stream.
pub fn encode_pixels(
    pixels: &[u8],
    width: usize,
    height: usize,
    compression: TgaCompression,
) -> Result<Vec<u8>, TgaError> {
    debug_assert_eq!(pixels.len(), width * height);
    let header = build_header(width, height, compression)?;

    let mut out = Vec::with_capacity(HEADER_LEN + pixels.len());
    out.extend_from_slice(&header);
    match compression {
        TgaCompression::Uncompressed => out.extend_from_slice(pixels),
        TgaCompression::RunLength => out.extend_from_slice(&pack_scanlines(pixels, width)),
    }
    Ok(out)
}

/// Lay out the fixed header. Bytes 0..2 stay zero (no image ID, no color
/// map), as do the color-map spec, the origins and the descriptor; row 0 is
/// therefore the bottom of the displayed image.
fn build_header(
    width: usize,
    height: usize,
    compression: TgaCompression,
) -> Result<[u8; HEADER_LEN], TgaError> {
    if width > u16::MAX as usize || height > u16::MAX as usize {
        return Err(TgaError::DimensionOverflow { width, height });
    }

    let mut header = [0u8; HEADER_LEN];
    header[2] = match compression {
        TgaCompression::Uncompressed => IMAGE_TYPE_GRAY,
        TgaCompression::RunLength => IMAGE_TYPE_GRAY_RLE,
    };
    header[12..14].copy_from_slice(&(width as u16).to_le_bytes());
    header[14..16].copy_from_slice(&(height as u16).to_le_bytes());
    header[16] = 8; // bits per pixel
    Ok(header)
}

/// A decoded grayscale image, pixels row-major in bottom-left row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

/// Parse a grayscale TGA produced by this codec or a compatible writer.
///
/// Accepts image types 3 and 11 at 8 bits per pixel without a color map,
/// skipping any image-ID field. Files stored top-to-bottom (descriptor
/// bit 5) are flipped so the result always uses bottom-left row order.
/// Bytes past the pixel data are ignored.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, TgaError> {
    if bytes.len() < HEADER_LEN {
        return Err(TgaError::UnsupportedFormat {
            reason: format!("{} bytes is shorter than the 18-byte header", bytes.len()),
        });
    }
    if bytes[1] != 0 {
        return Err(TgaError::UnsupportedFormat {
            reason: "color-mapped images are not grayscale".to_string(),
        });
    }
    if bytes[16] != 8 {
        return Err(TgaError::UnsupportedFormat {
            reason: format!("{} bits per pixel, expected 8", bytes[16]),
        });
    }

    let id_length = bytes[0] as usize;
    let width = u16::from_le_bytes([bytes[12], bytes[13]]) as usize;
    let height = u16::from_le_bytes([bytes[14], bytes[15]]) as usize;
    let data = bytes
        .get(HEADER_LEN + id_length..)
        .ok_or_else(|| TgaError::UnsupportedFormat {
            reason: format!("image ID of {id_length} bytes runs past the file"),
        })?;

    let mut pixels = match bytes[2] {
        IMAGE_TYPE_GRAY => {
            let expected = width * height;
            if data.len() < expected {
                // expected > 0 here, so width > 0
                return Err(TgaError::TruncatedStream {
                    row: data.len() / width,
                });
            }
            data[..expected].to_vec()
        }
        IMAGE_TYPE_GRAY_RLE => unpack_scanlines(data, width, height)?,
        other => {
            return Err(TgaError::UnsupportedFormat {
                reason: format!("image type {other}, expected 3 or 11"),
            });
        }
    };

    if bytes[17] & DESCRIPTOR_TOP_LEFT != 0 && width > 0 {
        flip_rows(&mut pixels, width);
    }

    Ok(DecodedImage {
        width,
        height,
        pixels,
    })
}

fn flip_rows(pixels: &mut [u8], width: usize) {
    let height = pixels.len() / width;
    for y in 0..height / 2 {
        let (top, bottom) = (y * width, (height - 1 - y) * width);
        for x in 0..width {
            pixels.swap(top + x, bottom + x);
        }
    }
}
