use heightfield::grid::Heightfield;

/// Convert per-cell altitudes into 8-bit grayscale intensities, row-major,
/// one byte per cell.
///
/// The scale is linear over the field's own range: the lowest cell maps to
/// 0, the highest to 255. A flat field renders as all zeros, an empty field
/// as an empty buffer.
pub fn sample_grayscale(field: &Heightfield) -> Vec<u8> {
    let (min, max) = match field.altitude_bounds() {
        Some(bounds) => bounds,
        None => return Vec::new(),
    };
    if min == max {
        return vec![0; field.cells().len()];
    }

    let span = max - min;
    field
        .cells()
        .iter()
        .map(|&altitude| scale_byte(altitude, min, span))
        .collect()
}

// Round, then clamp against float error before the cast.
fn scale_byte(altitude: f32, min: f32, span: f32) -> u8 {
    (255.0 * (altitude - min) / span).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_fields_sample_to_zero() {
        let mut field = Heightfield::new(3, 3);
        field.fill(7.5);
        assert_eq!(sample_grayscale(&field), vec![0; 9]);
    }

    #[test]
    fn empty_fields_sample_to_an_empty_buffer() {
        assert_eq!(sample_grayscale(&Heightfield::new(0, 5)), Vec::<u8>::new());
        assert_eq!(sample_grayscale(&Heightfield::new(5, 0)), Vec::<u8>::new());
    }

    #[test]
    fn extremes_map_to_0_and_255() {
        let field = Heightfield::from_cells(2, 1, vec![1.0, 3.0]);
        assert_eq!(sample_grayscale(&field), vec![0, 255]);
    }

    #[test]
    fn midpoints_round_to_the_nearest_intensity() {
        let field = Heightfield::from_cells(3, 1, vec![0.0, 0.5, 1.0]);
        // 127.5 rounds away from zero
        assert_eq!(sample_grayscale(&field), vec![0, 128, 255]);
    }

    #[test]
    fn negative_altitudes_scale_like_any_other_range() {
        let field = Heightfield::from_cells(3, 1, vec![-2.0, 0.0, 2.0]);
        assert_eq!(sample_grayscale(&field), vec![0, 128, 255]);
    }

    #[test]
    fn output_follows_row_major_cell_order() {
        let mut field = Heightfield::new(2, 2);
        field.set_altitude(1, 0, 10.0);
        field.set_altitude(0, 1, 5.0);
        assert_eq!(sample_grayscale(&field), vec![0, 255, 128, 0]);
    }
}
