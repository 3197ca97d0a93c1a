// The viewfinder overlay renderer.
// Visual outcomes per frame, painted over the live camera image:
// - everything outside the framing rectangle is washed with the mask color;
// - the framing rectangle gets a thin border and four corner L-brackets;
// - a gradient "laser" band sweeps downward through the frame and wraps;
// - an optional caption is word-wrapped and centered above/below the frame;
// - candidate result points flash inside the frame and fade one tick later;
// - a frozen result snapshot, when set, replaces all of the above.

use crate::color;
use crate::config::{TextLocation, ViewfinderConfig};
use crate::draw;
use crate::points::PointBuffer;
use crate::types::{FrameBuffer, Rect, ResultPoint};
use image::RgbImage;
use std::sync::Arc;
use std::time::Duration;

/// Delay before the next self-requested redraw of an animated frame.
pub const ANIMATION_DELAY: Duration = Duration::from_millis(8);
/// Opacity of the freeze-frame overlay and of just-frozen result points.
pub const CURRENT_POINT_OPACITY: u32 = 0xA0;
/// Radius of a just-frozen result-point marker; trailing markers use half.
pub const POINT_SIZE: i32 = 8;
/// Height of the laser band in pixels.
pub const SCANNER_LINE_HEIGHT: i32 = 10;
/// Pixels the laser band advances per animation tick.
pub const SCANNER_LINE_MOVE_DISTANCE: i32 = 6;

/// Camera collaborator seam: where is the active scan region right now?
/// Queried once per render when no fixed frame size is configured.
pub trait FramingSource {
    fn framing_rect(&self) -> Option<Rect>;
}

/// Directive returned by an animated render: the host should request one
/// redraw of `region` after `after`. `None` from `render` means the
/// animation is suspended (freeze frame active, or no frame resolved yet)
/// and the next natural host event is the retry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedrawRequest {
    pub after: Duration,
    pub region: Rect,
}

pub struct ViewfinderRenderer {
    config: ViewfinderConfig,
    framing: Option<Box<dyn FramingSource + Send>>,
    /// (scan_start, scan_end) laser cursor, set lazily on first valid frame.
    cursor: Option<(i32, i32)>,
    /// Freeze-frame snapshot; while set, the live animation is suppressed.
    result_overlay: Option<RgbImage>,
    /// Accumulating point set, shared with the decode thread.
    points: Arc<PointBuffer>,
    /// Last tick's frozen set, drawn smaller and dimmer for a trailing fade.
    previous_points: Vec<ResultPoint>,
}

impl ViewfinderRenderer {
    pub fn new(config: ViewfinderConfig) -> Self {
        Self {
            config,
            framing: None,
            cursor: None,
            result_overlay: None,
            points: Arc::new(PointBuffer::new()),
            previous_points: Vec::new(),
        }
    }

    /// Attach the camera collaborator queried for the framing rectangle.
    pub fn set_framing_source(&mut self, source: Box<dyn FramingSource + Send>) {
        self.framing = Some(source);
    }

    /// Handle for the decode thread: append candidate points through this.
    pub fn points(&self) -> Arc<PointBuffer> {
        Arc::clone(&self.points)
    }

    /// Record one candidate feature point, if point display is enabled.
    pub fn add_possible_result_point(&self, point: ResultPoint) {
        if self.config.show_result_points {
            self.points.append(point);
        }
    }

    /// Freeze the display on a decoded-image snapshot (or clear it).
    pub fn set_result_overlay(&mut self, image: Option<RgbImage>) {
        self.result_overlay = image;
    }

    /// Drop the freeze frame and let the animation resume.
    pub fn clear_result_overlay(&mut self) {
        self.result_overlay = None;
    }

    pub fn set_caption_text(&mut self, text: impl Into<String>) {
        self.config.caption_text = text.into();
    }

    pub fn set_caption_color(&mut self, argb: u32) {
        self.config.caption_color = argb;
    }

    pub fn set_caption_size(&mut self, size: f32) {
        self.config.caption_size = size;
    }

    pub fn show_result_points(&self) -> bool {
        self.config.show_result_points
    }

    pub fn set_show_result_points(&mut self, show: bool) {
        self.config.show_result_points = show;
    }

    /// Resolve the active scan region for a canvas of the given size.
    /// A valid fixed-size configuration wins; a degenerate one (non-positive
    /// or not strictly inside the canvas) falls back to the camera
    /// collaborator. `None` means "not ready yet": skip this frame.
    fn resolve_frame(&self, canvas_w: usize, canvas_h: usize) -> Option<Rect> {
        if canvas_w == 0 || canvas_h == 0 {
            return None;
        }
        let (w, h) = (canvas_w as i32, canvas_h as i32);
        let (fw, fh) = (self.config.frame_width, self.config.frame_height);
        if fw > 0 && fw < w && fh > 0 && fh < h {
            let left =
                (w - fw) / 2 + (self.config.padding_left - self.config.padding_right) / 2;
            let top =
                (h - fh) / 2 + (self.config.padding_top - self.config.padding_bottom) / 2;
            return Some(Rect::new(left, top, left + fw, top + fh));
        }
        self.framing
            .as_ref()
            .and_then(|source| source.framing_rect())
            .filter(Rect::is_valid)
    }

    /// Paint one frame of the overlay. Returns the redraw directive for the
    /// host, or `None` when the animation is suspended (no frame resolved,
    /// or a freeze frame is showing).
    pub fn render(&mut self, fb: &mut FrameBuffer) -> Option<RedrawRequest> {
        let frame = self.resolve_frame(fb.width, fb.height)?;

        if self.cursor.is_none() {
            self.cursor = Some((frame.top, frame.bottom - SCANNER_LINE_HEIGHT));
        }

        self.draw_exterior(fb, &frame);

        if let Some(img) = &self.result_overlay {
            // Freeze frame: the snapshot replaces the whole animation and no
            // further redraw is requested until something clears it.
            draw::blit_stretched(
                fb,
                img,
                frame.left,
                frame.top,
                frame.right,
                frame.bottom,
                CURRENT_POINT_OPACITY,
            );
            return None;
        }

        self.draw_frame(fb, &frame);
        self.draw_corners(fb, &frame);
        self.draw_laser(fb, &frame);
        self.draw_caption(fb, &frame);
        self.draw_result_points(fb, &frame);

        Some(RedrawRequest {
            after: ANIMATION_DELAY,
            region: frame.expand(POINT_SIZE),
        })
    }

    /// Wash the four strips outside the frame with the mask color.
    /// Never touches the frame interior.
    fn draw_exterior(&self, fb: &mut FrameBuffer, frame: &Rect) {
        let (w, h) = (fb.width as i32, fb.height as i32);
        let mask = self.config.mask_color;
        draw::fill_rect(fb, 0, 0, w, frame.top, mask);
        draw::fill_rect(fb, 0, frame.top, frame.left, frame.bottom, mask);
        draw::fill_rect(fb, frame.right, frame.top, w, frame.bottom, mask);
        draw::fill_rect(fb, 0, frame.bottom, w, h, mask);
    }

    /// Thin border just inside the frame edges.
    fn draw_frame(&self, fb: &mut FrameBuffer, frame: &Rect) {
        let lw = self.config.frame_line_width;
        let c = self.config.frame_color;
        draw::fill_rect(fb, frame.left, frame.top, frame.right, frame.top + lw, c);
        draw::fill_rect(fb, frame.left, frame.top + lw, frame.left + lw, frame.bottom - lw, c);
        draw::fill_rect(fb, frame.right - lw, frame.top + lw, frame.right, frame.bottom - lw, c);
        draw::fill_rect(fb, frame.left, frame.bottom - lw, frame.right, frame.bottom, c);
    }

    /// An L-bracket at each corner: one long-tall and one long-wide
    /// rectangle, mirrored per corner.
    fn draw_corners(&self, fb: &mut FrameBuffer, frame: &Rect) {
        let cw = self.config.corner_line_width;
        let ch = self.config.corner_line_height;
        let c = self.config.corner_color;
        let (l, t, r, b) = (frame.left, frame.top, frame.right, frame.bottom);
        // top-left
        draw::fill_rect(fb, l, t, l + cw, t + ch, c);
        draw::fill_rect(fb, l, t, l + ch, t + cw, c);
        // top-right
        draw::fill_rect(fb, r - cw, t, r, t + ch, c);
        draw::fill_rect(fb, r - ch, t, r, t + cw, c);
        // bottom-left
        draw::fill_rect(fb, l, b - ch, l + cw, b, c);
        draw::fill_rect(fb, l, b - cw, l + ch, b, c);
        // bottom-right
        draw::fill_rect(fb, r - cw, b - ch, r, b, c);
        draw::fill_rect(fb, r - ch, b - cw, r, b, c);
    }

    /// One tick of the laser sweep: draw the gradient band at the cursor and
    /// step it down, or wrap back to the frame top (nothing drawn that tick).
    fn draw_laser(&mut self, fb: &mut FrameBuffer, frame: &Rect) {
        let Some((scan_start, scan_end)) = self.cursor else {
            return;
        };
        if scan_start <= scan_end {
            let laser = self.config.laser_color;
            draw::fill_ellipse_vgrad(
                fb,
                frame.left + 2 * SCANNER_LINE_HEIGHT,
                scan_start,
                frame.right - 2 * SCANNER_LINE_HEIGHT,
                scan_start + SCANNER_LINE_HEIGHT,
                color::shade(laser),
                laser,
            );
            self.cursor = Some((scan_start + SCANNER_LINE_MOVE_DISTANCE, scan_end));
        } else {
            self.cursor = Some((frame.top, scan_end));
        }
    }

    /// Word-wrapped caption, line-centered on the frame's center column.
    /// Wrap width is the canvas width, matching the original layout.
    fn draw_caption(&self, fb: &mut FrameBuffer, frame: &Rect) {
        if self.config.caption_text.is_empty() {
            return;
        }
        let scale = ((self.config.caption_size / draw::GLYPH_HEIGHT as f32).round() as i32).max(1);
        let lines = draw::wrap_text(&self.config.caption_text, scale, fb.width as i32);
        if lines.is_empty() {
            return;
        }
        let lh = draw::line_height(scale);
        let block_h = lines.len() as i32 * lh;
        let center_x = frame.left + frame.width() / 2;
        let mut y = match self.config.caption_location {
            TextLocation::Bottom => frame.bottom + self.config.caption_padding,
            TextLocation::Top => frame.top - self.config.caption_padding - block_h,
        };
        for line in &lines {
            let x = center_x - draw::text_width(line, scale) / 2;
            draw::draw_text(fb, x, y, line, scale, self.config.caption_color);
            y += lh;
        }
    }

    /// Freeze the accumulated point set and draw it, with last tick's set
    /// trailing behind smaller and dimmer. Points outside the frame are
    /// skipped, not clamped.
    fn draw_result_points(&mut self, fb: &mut FrameBuffer, frame: &Rect) {
        if !self.config.show_result_points {
            // Keep the shared buffer from accumulating while display is off.
            self.points.clear();
            self.previous_points.clear();
            return;
        }

        let frozen = self.points.swap_and_trim();
        if frozen.is_empty() {
            // Fade completes in one tick: no new points, no trail either.
            self.previous_points.clear();
            return;
        }

        let full = color::with_alpha(self.config.result_point_color, CURRENT_POINT_OPACITY);
        for p in &frozen {
            if frame.contains(p.x, p.y) {
                draw::fill_circle(fb, p.x, p.y, POINT_SIZE as f32, full);
            }
        }

        let dim = color::with_alpha(self.config.result_point_color, CURRENT_POINT_OPACITY / 2);
        let radius = POINT_SIZE as f32 / 2.0;
        for p in &self.previous_points {
            if frame.contains(p.x, p.y) {
                draw::fill_circle(fb, p.x, p.y, radius, dim);
            }
        }

        self.previous_points = frozen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubFraming(Option<Rect>);

    impl FramingSource for StubFraming {
        fn framing_rect(&self) -> Option<Rect> {
            self.0
        }
    }

    fn renderer_with_stub(rect: Rect) -> ViewfinderRenderer {
        let mut r = ViewfinderRenderer::new(ViewfinderConfig::default());
        r.set_framing_source(Box::new(StubFraming(Some(rect))));
        r
    }

    #[test]
    fn fixed_frame_is_centered_and_shifted_by_half_padding_delta() {
        let config = ViewfinderConfig {
            frame_width: 100,
            frame_height: 80,
            padding_left: 10,
            padding_right: 2,
            padding_top: 4,
            padding_bottom: 0,
            ..Default::default()
        };
        let r = ViewfinderRenderer::new(config);
        let frame = r.resolve_frame(640, 480).unwrap();
        assert_eq!(frame.left, (640 - 100) / 2 + (10 - 2) / 2);
        assert_eq!(frame.top, (480 - 80) / 2 + (4 - 0) / 2);
        assert_eq!(frame.width(), 100);
        assert_eq!(frame.height(), 80);
    }

    #[test]
    fn oversized_fixed_frame_falls_back_to_the_camera_rect() {
        let camera_rect = Rect::new(20, 30, 120, 130);
        let config = ViewfinderConfig {
            frame_width: 700, // wider than the canvas
            frame_height: 80,
            ..Default::default()
        };
        let mut r = ViewfinderRenderer::new(config);
        r.set_framing_source(Box::new(StubFraming(Some(camera_rect))));
        assert_eq!(r.resolve_frame(640, 480), Some(camera_rect));
    }

    #[test]
    fn no_frame_means_no_draw_and_no_redraw_request() {
        let mut r = ViewfinderRenderer::new(ViewfinderConfig::default());
        let mut fb = FrameBuffer::new(64, 64);
        assert_eq!(r.render(&mut fb), None);
        assert!(fb.pixels.iter().all(|&p| p == 0));

        // Degenerate camera rect is just as unusable
        r.set_framing_source(Box::new(StubFraming(Some(Rect::new(10, 10, 10, 50)))));
        assert_eq!(r.render(&mut fb), None);
        assert!(fb.pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn zero_sized_canvas_is_skipped() {
        let mut r = renderer_with_stub(Rect::new(10, 10, 110, 110));
        let mut fb = FrameBuffer::new(0, 0);
        assert_eq!(r.render(&mut fb), None);
    }

    #[test]
    fn animated_render_requests_a_redraw_of_the_expanded_frame() {
        let frame = Rect::new(10, 10, 110, 110);
        let mut r = renderer_with_stub(frame);
        let mut fb = FrameBuffer::new(200, 200);
        let req = r.render(&mut fb).unwrap();
        assert_eq!(req.after, ANIMATION_DELAY);
        assert_eq!(req.region, frame.expand(POINT_SIZE));
    }

    #[test]
    fn laser_cursor_initializes_steps_and_wraps() {
        // frame (10,10,110,110), laser height 10: start 10, end 100
        let mut r = renderer_with_stub(Rect::new(10, 10, 110, 110));
        let mut fb = FrameBuffer::new(200, 200);

        r.render(&mut fb);
        let (_, end) = r.cursor.unwrap();
        assert_eq!(end, 100);

        // After 9 ticks: 10 + 9 * 6 = 64, still sweeping
        for _ in 0..8 {
            r.render(&mut fb);
        }
        assert_eq!(r.cursor.unwrap().0, 64);

        // Monotone advance up to one step past scan_end, then a wrap tick
        let mut last = 64;
        loop {
            r.render(&mut fb);
            let (start, _) = r.cursor.unwrap();
            if start < last {
                assert_eq!(start, 10); // wrapped to frame.top
                break;
            }
            assert_eq!(start, last + SCANNER_LINE_MOVE_DISTANCE);
            assert!(start <= 100 + SCANNER_LINE_MOVE_DISTANCE); // never drawn past end
            last = start;
        }
    }

    #[test]
    fn exterior_mask_never_touches_the_frame_interior() {
        let mut r = renderer_with_stub(Rect::new(60, 20, 260, 220));
        let mut fb = FrameBuffer::new(320, 240);
        fb.pixels.fill(0x00FF_FFFF);
        r.render(&mut fb);
        // Outside the frame: darkened by the mask
        assert_ne!(fb.pixels[5 * 320 + 5], 0x00FF_FFFF);
        // Frame center: clear of mask, border, corners, and the (top) laser
        assert_eq!(fb.pixels[120 * 320 + 160], 0x00FF_FFFF);
    }

    #[test]
    fn result_overlay_freezes_the_animation() {
        let mut r = renderer_with_stub(Rect::new(10, 10, 110, 110));
        let mut fb = FrameBuffer::new(200, 200);
        r.render(&mut fb);
        let cursor_before = r.cursor;

        r.set_result_overlay(Some(RgbImage::from_pixel(4, 4, image::Rgb([0, 255, 0]))));
        let mut frozen_fb = FrameBuffer::new(200, 200);
        assert_eq!(r.render(&mut frozen_fb), None); // self-suspended
        assert_eq!(r.cursor, cursor_before); // laser did not advance

        // The snapshot fills the frame at 0xA0 opacity; no corner brackets
        let expected = color::blend_over(0, color::with_alpha(0x0000_FF00, 0xA0));
        assert_eq!(frozen_fb.pixels[11 * 200 + 11], expected);

        r.clear_result_overlay();
        assert!(r.render(&mut fb).is_some()); // animation resumes
    }

    #[test]
    fn points_outside_the_frame_are_never_drawn() {
        let mut r = renderer_with_stub(Rect::new(10, 10, 110, 110));
        r.set_show_result_points(true);
        r.add_possible_result_point(ResultPoint::new(50.0, 50.0));
        r.add_possible_result_point(ResultPoint::new(150.0, 50.0)); // outside

        let mut fb = FrameBuffer::new(200, 200);
        r.render(&mut fb);
        assert_ne!(fb.pixels[50 * 200 + 50], 0); // inside point drawn
        assert_eq!(fb.pixels[50 * 200 + 150], 0); // outside point skipped
    }

    #[test]
    fn point_buffer_swaps_and_trims_on_render() {
        let mut r = renderer_with_stub(Rect::new(10, 10, 110, 110));
        r.set_show_result_points(true);
        for i in 0..21 {
            r.add_possible_result_point(ResultPoint::new(20.0 + i as f32, 50.0));
        }
        assert_eq!(r.points.len(), 21); // no trim before the swap

        let mut fb = FrameBuffer::new(200, 200);
        r.render(&mut fb);
        // Oldest 11 dropped; the retained tail becomes the trailing set
        assert!(r.points.is_empty());
        assert_eq!(r.previous_points.len(), 10);
        assert_eq!(r.previous_points[0], ResultPoint::new(31.0, 50.0));
        assert_eq!(r.previous_points[9], ResultPoint::new(40.0, 50.0));

        // Next tick with nothing new: trail clears in one step
        r.render(&mut fb);
        assert!(r.previous_points.is_empty());
    }

    #[test]
    fn append_is_ignored_while_display_is_off() {
        let r = ViewfinderRenderer::new(ViewfinderConfig::default());
        r.add_possible_result_point(ResultPoint::new(1.0, 1.0));
        assert!(r.points.is_empty());
    }

    #[test]
    fn caption_draws_above_the_frame_by_default() {
        let mut r = renderer_with_stub(Rect::new(60, 100, 260, 220));
        r.set_caption_text("SCAN");
        r.set_caption_size(14.0); // scale 2
        let mut fb = FrameBuffer::new(320, 240);
        r.render(&mut fb);

        // Block of one line (height 18) ends at frame.top - padding (24):
        // glyph rows live in y = 58..76
        let band_painted = (58..76)
            .flat_map(|y| fb.pixels[y * 320..(y + 1) * 320].iter())
            .any(|&p| p != 0);
        assert!(band_painted);
        // Nothing between the caption block and the frame edge
        assert!(fb.pixels[80 * 320..90 * 320].iter().all(|&p| p == 0));
    }

    #[test]
    fn caption_draws_below_the_frame_when_placed_bottom() {
        let config = ViewfinderConfig {
            caption_text: "SCAN".into(),
            caption_size: 14.0,
            caption_location: TextLocation::Bottom,
            ..Default::default()
        };
        let mut r = ViewfinderRenderer::new(config);
        r.set_framing_source(Box::new(StubFraming(Some(Rect::new(60, 20, 260, 140)))));
        let mut fb = FrameBuffer::new(320, 240);
        r.render(&mut fb);

        // Block starts at frame.bottom + padding = 164
        let band_painted = (164..182)
            .flat_map(|y| fb.pixels[y * 320..(y + 1) * 320].iter())
            .any(|&p| p != 0);
        assert!(band_painted);
        assert!(fb.pixels[145 * 320..160 * 320].iter().all(|&p| p == 0));
    }
}
