//! Stride-sampled sharpness estimation
//!
//! Approximates a Laplacian-variance blur metric over a sub-grid of pixels
//! instead of the full image. Stride 4 drops ~75% of the per-pixel work
//! while keeping the accept decision stable against the stride-2 baseline.

use crate::types::Frame;

/// Variance of the discrete Laplacian response over a stride-sampled grid.
///
/// Pure and total: never panics, and the result is always finite and
/// non-negative. A frame too small to sample (or a degenerate buffer)
/// scores exactly 0.0.
pub fn sharpness_score(frame: &Frame, stride: u32) -> f64 {
    let stride = stride.max(1) as usize;
    if frame.width < 3 || frame.height < 3 {
        return 0.0;
    }

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let mut count = 0u64;

    // Interior pixels only so the 4-neighbor stencil stays in bounds.
    for y in (1..frame.height - 1).step_by(stride) {
        for x in (1..frame.width - 1).step_by(stride) {
            let center = frame.luma(x, y) as f64;
            let response = 4.0 * center
                - frame.luma(x - 1, y) as f64
                - frame.luma(x + 1, y) as f64
                - frame.luma(x, y - 1) as f64
                - frame.luma(x, y + 1) as f64;
            sum += response;
            sum_sq += response * response;
            count += 1;
        }
    }

    if count == 0 {
        return 0.0;
    }

    let n = count as f64;
    let mean = sum / n;
    let variance = (sum_sq / n - mean * mean).max(0.0);
    if variance.is_finite() {
        variance
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(width: u32, height: u32) -> Frame {
        Frame::new(vec![128u8; (width * height * 3) as usize], width, height)
    }

    #[test]
    fn test_flat_frame_scores_zero() {
        assert_eq!(sharpness_score(&flat(64, 48), 4), 0.0);
    }

    #[test]
    fn test_degenerate_frame_scores_zero() {
        assert_eq!(sharpness_score(&flat(0, 0), 4), 0.0);
        assert_eq!(sharpness_score(&flat(2, 2), 4), 0.0);
        assert_eq!(sharpness_score(&flat(100, 1), 4), 0.0);
    }

    #[test]
    fn test_empty_buffer_scores_zero() {
        // Dimensions claim pixels the buffer does not have.
        let frame = Frame::new(Vec::new(), 64, 48);
        assert_eq!(sharpness_score(&frame, 4), 0.0);
    }

    #[test]
    fn test_stride_zero_treated_as_one() {
        let frame = flat(16, 16);
        assert_eq!(sharpness_score(&frame, 0), 0.0);
    }

    #[test]
    fn test_high_contrast_beats_flat() {
        let width = 64u32;
        let height = 48u32;
        let mut data = vec![0u8; (width * height * 3) as usize];
        // 5px checkerboard; check size coprime with the stride so block
        // boundaries land on sampled pixels.
        for y in 0..height {
            for x in 0..width {
                let white = ((x / 5) + (y / 5)) % 2 == 0;
                let v = if white { 255 } else { 0 };
                let idx = ((y * width + x) * 3) as usize;
                data[idx] = v;
                data[idx + 1] = v;
                data[idx + 2] = v;
            }
        }
        let sharp = Frame::new(data, width, height);
        assert!(sharpness_score(&sharp, 4) > sharpness_score(&flat(width, height), 4));
    }
}
