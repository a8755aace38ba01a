//! Run-length packetization of grayscale scanlines.
//!
//! Each packet is one control byte plus payload. With the high bit set, the
//! byte that follows repeats `(control & 0x7F) + 1` times; with it clear,
//! that many literal bytes follow. A packet covers at most 128 pixels and
//! never spans a scanline boundary.

use crate::tga::TgaError;

/// High bit of a control byte, set on run packets.
pub const RUN_FLAG: u8 = 0x80;
/// Longest pixel span a single packet can cover.
pub const MAX_PACKET_PIXELS: usize = 128;

/// Encode a row-major pixel buffer as a packet stream, one scanline at a
/// time. A zero-width buffer encodes to nothing.
pub fn pack_scanlines(pixels: &[u8], width: usize) -> Vec<u8> {
    let mut out = Vec::new();
    if width == 0 {
        return out;
    }
    for row in pixels.chunks(width) {
        pack_row(row, &mut out);
    }
    out
}

fn pack_row(row: &[u8], out: &mut Vec<u8>) {
    let mut i = 0;
    while i < row.len() {
        let run = run_length(&row[i..]);
        if run >= 2 {
            // Maximal run, split into packets of up to 128 pixels.
            let value = row[i];
            let mut remaining = run;
            while remaining > 0 {
                let take = remaining.min(MAX_PACKET_PIXELS);
                out.push(RUN_FLAG | (take - 1) as u8);
                out.push(value);
                remaining -= take;
            }
            i += run;
        } else {
            // Literals accumulate until the next run starts or the packet
            // is full.
            let start = i;
            i += 1;
            while i < row.len() && i - start < MAX_PACKET_PIXELS && run_length(&row[i..]) < 2 {
                i += 1;
            }
            out.push((i - start - 1) as u8);
            out.extend_from_slice(&row[start..i]);
        }
    }
}

/// Length of the maximal run of identical bytes at the start of `bytes`.
fn run_length(bytes: &[u8]) -> usize {
    let value = bytes[0];
    bytes.iter().take_while(|&&b| b == value).count()
}

/// Decode a packet stream back into `width * height` pixels.
///
/// Fails with [`TgaError::TruncatedStream`] when the stream ends inside a
/// scanline or a packet claims more pixels than the scanline has left.
/// Bytes past the final scanline are ignored; files may carry a footer.
pub fn unpack_scanlines(stream: &[u8], width: usize, height: usize) -> Result<Vec<u8>, TgaError> {
    // A 2-byte run packet covers at most 128 pixels, so no stream decodes
    // to more than 64 pixels per input byte. The claimed size alone is not
    // trusted for the reservation.
    let upper_bound = stream.len().saturating_mul(MAX_PACKET_PIXELS / 2);
    let mut pixels = Vec::with_capacity((width * height).min(upper_bound));
    let mut pos = 0;

    for row in 0..height {
        let mut filled = 0;
        while filled < width {
            let control = *stream.get(pos).ok_or(TgaError::TruncatedStream { row })?;
            pos += 1;
            let count = (control & !RUN_FLAG) as usize + 1;
            if count > width - filled {
                return Err(TgaError::TruncatedStream { row });
            }
            if control & RUN_FLAG != 0 {
                let value = *stream.get(pos).ok_or(TgaError::TruncatedStream { row })?;
                pos += 1;
                pixels.resize(pixels.len() + count, value);
            } else {
                let literals = stream
                    .get(pos..pos + count)
                    .ok_or(TgaError::TruncatedStream { row })?;
                pixels.extend_from_slice(literals);
                pos += count;
            }
            filled += count;
        }
    }

    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_uniform_row_packs_into_one_run_packet() {
        assert_eq!(pack_scanlines(&[9; 20], 20), vec![RUN_FLAG | 19, 9]);
    }

    #[test]
    fn a_single_pixel_row_packs_as_one_literal() {
        assert_eq!(pack_scanlines(&[42], 1), vec![0x00, 42]);
    }

    #[test]
    fn long_runs_split_at_128_pixels() {
        assert_eq!(
            pack_scanlines(&[7; 300], 300),
            vec![0xFF, 7, 0xFF, 7, RUN_FLAG | 43, 7]
        );
        // One pixel past a full packet leaves a legal 1-run
        assert_eq!(
            pack_scanlines(&[7; 129], 129),
            vec![0xFF, 7, RUN_FLAG, 7]
        );
    }

    #[test]
    fn literals_absorb_until_the_next_run() {
        let row = [7, 7, 7, 1, 2, 3, 9, 9];
        assert_eq!(
            pack_scanlines(&row, row.len()),
            vec![RUN_FLAG | 2, 7, 0x02, 1, 2, 3, RUN_FLAG | 1, 9]
        );
    }

    #[test]
    fn long_literal_stretches_split_at_128_pixels() {
        let row: Vec<u8> = (0..200u8).collect();
        let packed = pack_scanlines(&row, row.len());

        assert_eq!(packed[0], 0x7F);
        assert_eq!(&packed[1..129], &row[..128]);
        assert_eq!(packed[129], 71);
        assert_eq!(&packed[130..], &row[128..]);
    }

    #[test]
    fn packets_never_span_scanlines() {
        // Two uniform rows of the same value stay two packets
        assert_eq!(
            pack_scanlines(&[5; 8], 4),
            vec![RUN_FLAG | 3, 5, RUN_FLAG | 3, 5]
        );
    }

    #[test]
    fn zero_width_buffers_pack_to_nothing() {
        assert_eq!(pack_scanlines(&[], 0), Vec::<u8>::new());
    }

    #[test]
    fn alternating_bytes_stay_literal() {
        let row = [1, 2, 1, 2, 1];
        assert_eq!(pack_scanlines(&row, 5), vec![0x04, 1, 2, 1, 2, 1]);
    }

    #[test]
    fn packed_streams_unpack_to_the_original() {
        let cases: Vec<(Vec<u8>, usize)> = vec![
            ((0..200u8).collect(), 200),
            (vec![7; 300], 300),
            (vec![1, 2, 1, 2, 1, 2], 3),
            (vec![5, 5, 5, 1, 2, 2, 9, 9, 9, 9, 0, 3], 12),
            (vec![0; 128], 64),
        ];
        for (pixels, width) in cases {
            let packed = pack_scanlines(&pixels, width);
            let unpacked = unpack_scanlines(&packed, width, pixels.len() / width).unwrap();
            assert_eq!(unpacked, pixels, "width {width}");
        }
    }

    #[test]
    fn unpacking_tolerates_trailing_bytes() {
        let mut packed = pack_scanlines(&[3, 3, 3, 3], 4);
        packed.extend_from_slice(b"TRUEVISION-XFILE.");
        assert_eq!(unpack_scanlines(&packed, 4, 1).unwrap(), vec![3; 4]);
    }

    #[test]
    fn an_exhausted_stream_is_truncated() {
        assert_eq!(
            unpack_scanlines(&[], 4, 1),
            Err(TgaError::TruncatedStream { row: 0 })
        );
        // Run control with no value byte
        assert_eq!(
            unpack_scanlines(&[RUN_FLAG | 3], 4, 1),
            Err(TgaError::TruncatedStream { row: 0 })
        );
        // Literal control with too few literals
        assert_eq!(
            unpack_scanlines(&[0x03, 1, 2], 4, 1),
            Err(TgaError::TruncatedStream { row: 0 })
        );
    }

    #[test]
    fn a_missing_second_row_is_truncated() {
        let packed = pack_scanlines(&[8; 4], 4);
        assert_eq!(
            unpack_scanlines(&packed, 4, 2),
            Err(TgaError::TruncatedStream { row: 1 })
        );
    }

    #[test]
    fn a_packet_overrunning_its_row_is_truncated() {
        // An 8-pixel run offered to a 4-pixel-wide image
        assert_eq!(
            unpack_scanlines(&[RUN_FLAG | 7, 6], 4, 2),
            Err(TgaError::TruncatedStream { row: 0 })
        );
    }

    #[test]
    fn a_huge_claimed_size_over_a_tiny_stream_is_truncated() {
        // Two bytes decode to at most 128 pixels of the 65535 x 65535 claim
        assert_eq!(
            unpack_scanlines(&[RUN_FLAG | 127, 0], 65_535, 65_535),
            Err(TgaError::TruncatedStream { row: 0 })
        );
    }
}
