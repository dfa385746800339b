use hx_core::{PixelSource, clamp_index};

/// Weight of the center tap of the 3x3 window.
pub const CENTER_WEIGHT: f64 = 0.5;
/// Weight of each of the eight surrounding taps.
pub const NEIGHBOR_WEIGHT: f64 = CENTER_WEIGHT / 8.0;

/// Weighted 3x3 average around `(cx, cy)` with clamp-to-edge addressing.
///
/// Taps falling outside the source are replaced by the nearest edge pixel and
/// keep their weight. Channels accumulate in `f64` and are rounded once after
/// normalization. Alpha is ignored.
pub fn sample_weighted3x3<S: PixelSource + ?Sized>(src: &S, cx: isize, cy: isize) -> [u8; 3] {
    let (w, h) = (src.width(), src.height());

    let mut acc = [0.0f64; 3];
    let mut total_weight = 0.0f64;

    for dy in -1isize..=1 {
        let Some(sy) = clamp_index(cy.saturating_add(dy), h) else {
            continue;
        };
        for dx in -1isize..=1 {
            let Some(sx) = clamp_index(cx.saturating_add(dx), w) else {
                continue;
            };

            let weight = if dx == 0 && dy == 0 {
                CENTER_WEIGHT
            } else {
                NEIGHBOR_WEIGHT
            };
            let px = src.pixel(sx, sy);
            acc[0] += weight * px[0] as f64;
            acc[1] += weight * px[1] as f64;
            acc[2] += weight * px[2] as f64;
            total_weight += weight;
        }
    }

    if total_weight <= 0.0 {
        return [0; 3];
    }

    acc.map(|c| (c / total_weight).round().clamp(0.0, 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use hx_core::{Image, Rgba8};

    use super::{CENTER_WEIGHT, NEIGHBOR_WEIGHT, sample_weighted3x3};

    fn gray(width: usize, height: usize, values: &[u8]) -> Image<Rgba8> {
        let data = values.iter().map(|&v| [v, v, v, 255]).collect();
        Image::from_vec(width, height, data).expect("valid image")
    }

    #[test]
    fn weights_sum_to_one() {
        assert_eq!(CENTER_WEIGHT + 8.0 * NEIGHBOR_WEIGHT, 1.0);
        assert_eq!(NEIGHBOR_WEIGHT, 0.0625);
    }

    #[test]
    fn interior_weighted_average() {
        #[rustfmt::skip]
        let img = gray(3, 3, &[
            0, 16, 0,
            16, 100, 16,
            0, 16, 0,
        ]);
        // 0.5 * 100 + 0.0625 * (4 * 16) = 54
        assert_eq!(sample_weighted3x3(&img, 1, 1), [54, 54, 54]);
    }

    #[test]
    fn channels_are_independent_and_alpha_ignored() {
        let data = vec![[10u8, 20, 30, 0]; 9];
        let img = Image::from_vec(3, 3, data).expect("valid image");
        assert_eq!(sample_weighted3x3(&img, 1, 1), [10, 20, 30]);
    }

    #[test]
    fn corner_clamps_to_edge_pixels() {
        #[rustfmt::skip]
        let img = gray(3, 3, &[
            200, 40, 0,
            80, 0, 0,
            0, 0, 0,
        ]);
        // Taps at (-1..=1, -1..=1) collapse onto column/row 0:
        // (0,0) x4 -> center 0.5 + 3 * 0.0625, (1,0) x2, (0,1) x2, (1,1) x1.
        let expected: f64 = 0.6875 * 200.0 + 0.125 * 40.0 + 0.125 * 80.0;
        assert_eq!(
            sample_weighted3x3(&img, 0, 0),
            [expected.round() as u8; 3]
        );
    }

    #[test]
    fn far_out_of_range_center_reads_the_corner() {
        let img = gray(2, 2, &[1, 2, 3, 250]);
        assert_eq!(sample_weighted3x3(&img, 50, 50), [250; 3]);
        assert_eq!(sample_weighted3x3(&img, -50, -50), [1; 3]);
        assert_eq!(sample_weighted3x3(&img, isize::MAX, isize::MIN), [2; 3]);
    }

    #[test]
    fn single_pixel_source_replicates() {
        let img = Image::from_vec(1, 1, vec![[7u8, 8, 9, 10]]).expect("valid image");
        assert_eq!(sample_weighted3x3(&img, 0, 0), [7, 8, 9]);
    }

    #[test]
    fn rounding_happens_once_after_normalization() {
        #[rustfmt::skip]
        let img = gray(3, 3, &[
            1, 1, 1,
            1, 0, 1,
            1, 1, 1,
        ]);
        // 8 * 0.0625 * 1 = 0.5 rounds half away from zero to 1; per-tap
        // rounding would have produced 0.
        assert_eq!(sample_weighted3x3(&img, 1, 1), [1; 3]);
    }
}
