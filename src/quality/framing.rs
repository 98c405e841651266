//! Geometric framing evaluation
//!
//! Locates the frame's visual reference points (high edge-energy samples)
//! on the same stride-reduced grid the sharpness pass uses, and checks that
//! their centroid falls inside a centered target region.

use crate::types::Frame;

/// Whether the frame's edge-energy centroid lies inside the centered target
/// region covering `target_fraction` of each axis.
///
/// Pure and total. Degenerate frames, or frames with no edge energy at all
/// (nothing to frame), evaluate to `false`.
pub fn framing_ok(frame: &Frame, stride: u32, target_fraction: f32) -> bool {
    let stride = stride.max(1) as usize;
    if frame.width < 3 || frame.height < 3 {
        return false;
    }
    if !(target_fraction > 0.0) {
        return false;
    }

    let mut weighted_x = 0.0f64;
    let mut weighted_y = 0.0f64;
    let mut total_energy = 0.0f64;

    for y in (1..frame.height - 1).step_by(stride) {
        for x in (1..frame.width - 1).step_by(stride) {
            let center = frame.luma(x, y) as f64;
            let response = 4.0 * center
                - frame.luma(x - 1, y) as f64
                - frame.luma(x + 1, y) as f64
                - frame.luma(x, y - 1) as f64
                - frame.luma(x, y + 1) as f64;
            let energy = response.abs();
            weighted_x += energy * x as f64;
            weighted_y += energy * y as f64;
            total_energy += energy;
        }
    }

    if total_energy <= f64::EPSILON {
        return false;
    }

    let centroid_x = weighted_x / total_energy;
    let centroid_y = weighted_y / total_energy;

    let fraction = f64::from(target_fraction.min(1.0));
    let half_w = frame.width as f64 * fraction / 2.0;
    let half_h = frame.height as f64 * fraction / 2.0;
    let center_x = frame.width as f64 / 2.0;
    let center_y = frame.height as f64 / 2.0;

    (centroid_x - center_x).abs() <= half_w && (centroid_y - center_y).abs() <= half_h
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with_detail_at(width: u32, height: u32, cx: u32, cy: u32, radius: u32) -> Frame {
        let mut data = vec![64u8; (width * height * 3) as usize];
        for y in cy.saturating_sub(radius)..(cy + radius).min(height) {
            for x in cx.saturating_sub(radius)..(cx + radius).min(width) {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                let idx = ((y * width + x) * 3) as usize;
                data[idx] = v;
                data[idx + 1] = v;
                data[idx + 2] = v;
            }
        }
        Frame::new(data, width, height)
    }

    #[test]
    fn test_centered_detail_passes() {
        let frame = frame_with_detail_at(64, 48, 32, 24, 10);
        assert!(framing_ok(&frame, 1, 0.5));
    }

    #[test]
    fn test_corner_detail_fails() {
        let frame = frame_with_detail_at(64, 48, 4, 4, 4);
        assert!(!framing_ok(&frame, 1, 0.5));
    }

    #[test]
    fn test_flat_frame_fails() {
        let frame = Frame::new(vec![128u8; 64 * 48 * 3], 64, 48);
        assert!(!framing_ok(&frame, 4, 0.5));
    }

    #[test]
    fn test_degenerate_frame_fails() {
        let frame = Frame::new(Vec::new(), 0, 0);
        assert!(!framing_ok(&frame, 4, 0.5));
    }

    #[test]
    fn test_invalid_fraction_fails() {
        let frame = frame_with_detail_at(64, 48, 32, 24, 10);
        assert!(!framing_ok(&frame, 1, 0.0));
        assert!(!framing_ok(&frame, 1, f32::NAN));
    }
}
