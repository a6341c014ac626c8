//! Watermark placement for captured frames.
//!
//! Pure layout only: the collaborator that owns the pixels draws the box
//! and text; this module just decides where they go.

use viewer_api::WatermarkStrategy;

/// Placement of the watermark backdrop box and text baseline inside a
/// captured frame, in pixels from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkLayout {
    /// Left edge of the text run.
    pub text_x: f64,
    /// Text baseline (bottom-aligned).
    pub text_y: f64,
    pub box_x: f64,
    pub box_y: f64,
    pub box_width: f64,
    pub box_height: f64,
}

/// Frame padding: 2% of the width, but never tighter than 24px.
fn frame_padding(frame_width: u32) -> f64 {
    (f64::from(frame_width) * 0.02).round().max(24.0)
}

pub fn watermark_layout(
    frame_width: u32,
    frame_height: u32,
    text_width: f64,
    text_height: f64,
    strategy: WatermarkStrategy,
) -> WatermarkLayout {
    let padding = frame_padding(frame_width);
    let text_y = f64::from(frame_height) - padding;
    let text_x = match strategy {
        WatermarkStrategy::BottomRight => f64::from(frame_width) - padding - text_width,
        WatermarkStrategy::BottomLeft => padding,
    };

    WatermarkLayout {
        text_x,
        text_y,
        box_x: text_x - padding * 0.25,
        box_y: text_y - text_height - padding * 0.15,
        box_width: text_width + padding * 0.5,
        box_height: text_height + padding * 0.55,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_right_hugs_the_corner() {
        let layout = watermark_layout(3840, 1920, 600.0, 36.0, WatermarkStrategy::BottomRight);
        // padding = round(3840 * 0.02) = 77
        assert_eq!(layout.text_x, 3840.0 - 77.0 - 600.0);
        assert_eq!(layout.text_y, 1920.0 - 77.0);
        assert_eq!(layout.box_width, 600.0 + 77.0 * 0.5);
        assert_eq!(layout.box_height, 36.0 + 77.0 * 0.55);
    }

    #[test]
    fn bottom_left_starts_at_padding() {
        let layout = watermark_layout(3840, 1920, 600.0, 36.0, WatermarkStrategy::BottomLeft);
        assert_eq!(layout.text_x, 77.0);
        assert_eq!(layout.box_x, 77.0 - 77.0 * 0.25);
    }

    #[test]
    fn narrow_frames_keep_minimum_padding() {
        let layout = watermark_layout(800, 400, 120.0, 36.0, WatermarkStrategy::BottomLeft);
        // 2% of 800 is 16, clamped up to 24.
        assert_eq!(layout.text_x, 24.0);
        assert_eq!(layout.text_y, 400.0 - 24.0);
    }
}
