// Visual configuration for the viewfinder, set once at construction.
// Colors are 0xAARRGGBB. Defaults follow the zxing-style scan UI this
// renderer reproduces.

/// Where the caption sits relative to the framing rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextLocation {
    #[default]
    Top,
    Bottom,
}

/// Styling for every element the viewfinder draws.
/// Caption text/color/size stay adjustable after construction through the
/// renderer's setters; everything else is fixed for the session.
#[derive(Clone, Debug)]
pub struct ViewfinderConfig {
    /// Translucent wash over everything outside the framing rectangle.
    pub mask_color: u32,
    /// Thin border along the framing rectangle edges.
    pub frame_color: u32,
    /// Border thickness in pixels.
    pub frame_line_width: i32,
    /// L-brackets at the four corners.
    pub corner_color: u32,
    /// Short side of a corner bracket arm.
    pub corner_line_width: i32,
    /// Long side of a corner bracket arm.
    pub corner_line_height: i32,
    /// The animated laser sweep.
    pub laser_color: u32,
    /// Result-point markers.
    pub result_point_color: u32,
    /// Whether result points are drawn at all.
    pub show_result_points: bool,

    /// Caption under/over the frame; empty string draws nothing.
    pub caption_text: String,
    pub caption_color: u32,
    /// Caption glyph height in pixels (quantized to the 5x7 font scale).
    pub caption_size: f32,
    /// Gap between the frame edge and the caption block.
    pub caption_padding: i32,
    pub caption_location: TextLocation,

    /// Fixed framing rectangle size; zero means "ask the camera".
    pub frame_width: i32,
    pub frame_height: i32,
    /// Insets shifting a fixed frame off center: the frame moves by
    /// (left - right) / 2 horizontally and (top - bottom) / 2 vertically.
    pub padding_left: i32,
    pub padding_top: i32,
    pub padding_right: i32,
    pub padding_bottom: i32,
}

impl Default for ViewfinderConfig {
    fn default() -> Self {
        Self {
            mask_color: 0x6000_0000,
            frame_color: 0xFF1F_B3E2,
            frame_line_width: 1,
            corner_color: 0xFF1F_B3E2,
            corner_line_width: 8,
            corner_line_height: 40,
            laser_color: 0xFF1F_B3E2,
            result_point_color: 0xC0FF_BD21,
            show_result_points: false,
            caption_text: String::new(),
            caption_color: 0xFFC0_C0C0,
            caption_size: 28.0,
            caption_padding: 24,
            caption_location: TextLocation::Top,
            frame_width: 0,
            frame_height: 0,
            padding_left: 0,
            padding_top: 0,
            padding_right: 0,
            padding_bottom: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let c = ViewfinderConfig::default();
        assert_eq!(c.mask_color, 0x6000_0000);
        assert_eq!(c.corner_line_width, 8);
        assert_eq!(c.corner_line_height, 40);
        assert_eq!(c.caption_location, TextLocation::Top);
        assert!(!c.show_result_points);
        assert_eq!(c.frame_width, 0); // camera-supplied framing by default
    }
}
