// Software drawing primitives over the framebuffer.
// Everything here blends ARGB sources onto the opaque 0x00RRGGBB buffer:
// rect fills for the mask/border/corners, discs for result points, a
// gradient ellipse for the laser sweep, a stretched blit for the freeze
// frame, and a scalable 5x7 bitmap font for the caption.

use crate::color;
use crate::types::FrameBuffer;
use image::RgbImage;

/// Blend one ARGB pixel at (x, y) if inside bounds.
/// Visual: the exact pixel at (x,y) shifts toward the source color.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, argb: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color::blend_over(fb.pixels[idx], argb);
}

/// Fill the rectangle [x0, x1) x [y0, y1), clipped to the buffer.
/// Visual: a solid (or translucent) block of color appears.
pub fn fill_rect(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, argb: u32) {
    if color::alpha(argb) == 0 {
        return;
    }
    let x0 = x0.max(0) as usize;
    let y0 = y0.max(0) as usize;
    let x1 = (x1.max(0) as usize).min(fb.width);
    let y1 = (y1.max(0) as usize).min(fb.height);
    for y in y0..y1 {
        let row = y * fb.width;
        for x in x0..x1 {
            fb.pixels[row + x] = color::blend_over(fb.pixels[row + x], argb);
        }
    }
}

/// Fill a disc of `radius` centered at (cx, cy).
/// Visual: a round marker dot; scans only the bounding box.
pub fn fill_circle(fb: &mut FrameBuffer, cx: f32, cy: f32, radius: f32, argb: u32) {
    if radius <= 0.0 || color::alpha(argb) == 0 {
        return;
    }
    let r2 = radius * radius;
    let x_lo = (cx - radius).floor() as i32;
    let x_hi = (cx + radius).ceil() as i32;
    let y_lo = (cy - radius).floor() as i32;
    let y_hi = (cy + radius).ceil() as i32;
    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                put_pixel(fb, x, y, argb);
            }
        }
    }
}

/// Fill the ellipse inscribed in [x0, x1) x [y0, y1) with a vertical
/// gradient from `top_argb` at y0 to `bottom_argb` at y1.
/// Visual: the laser band, bright at its lower edge and fading upward.
pub fn fill_ellipse_vgrad(
    fb: &mut FrameBuffer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    top_argb: u32,
    bottom_argb: u32,
) {
    let w = x1 - x0;
    let h = y1 - y0;
    if w <= 0 || h <= 0 {
        return;
    }
    let cx = x0 as f32 + w as f32 / 2.0;
    let cy = y0 as f32 + h as f32 / 2.0;
    let rx = w as f32 / 2.0;
    let ry = h as f32 / 2.0;
    for y in y0..y1 {
        let t = (y - y0) as f32 / (h - 1).max(1) as f32;
        let row_color = color::lerp(top_argb, bottom_argb, t);
        // Solve the ellipse equation for this row's horizontal extent
        let dy = (y as f32 + 0.5 - cy) / ry;
        let k = 1.0 - dy * dy;
        if k <= 0.0 {
            continue;
        }
        let half = rx * k.sqrt();
        let xs = (cx - half).round() as i32;
        let xe = (cx + half).round() as i32;
        for x in xs..xe {
            put_pixel(fb, x, y, row_color);
        }
    }
}

/// Stretch-blit an RGB image into [x0, x1) x [y0, y1) at fixed opacity,
/// nearest-neighbor. Visual: the freeze-frame snapshot fills the scan region.
pub fn blit_stretched(
    fb: &mut FrameBuffer,
    img: &RgbImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    opacity: u32,
) {
    let dw = x1 - x0;
    let dh = y1 - y0;
    if dw <= 0 || dh <= 0 || img.width() == 0 || img.height() == 0 {
        return;
    }
    for y in 0..dh {
        let sy = (y as u32 * img.height()) / dh as u32;
        for x in 0..dw {
            let sx = (x as u32 * img.width()) / dw as u32;
            let p = img.get_pixel(sx, sy);
            let argb = color::with_alpha(
                color::pack_rgb(p[0] as u32, p[1] as u32, p[2] as u32),
                opacity,
            );
            put_pixel(fb, x0 + x, y0 + y, argb);
        }
    }
}

/* ---------- scalable 5x7 bitmap font (caption text) ---------- */

pub const GLYPH_WIDTH: i32 = 5;
pub const GLYPH_HEIGHT: i32 = 7;
/// Horizontal advance per glyph in font units (5 px glyph + 1 px spacing).
pub const GLYPH_ADVANCE: i32 = 6;
/// Vertical advance per line in font units (7 px glyph + 2 px leading).
pub const LINE_ADVANCE: i32 = 9;

/// Return a 5x7 glyph bitmap. Each u8 is a row; the low 5 bits are the
/// pixels (bit 4 = leftmost). Lowercase letters map to uppercase.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00100,0b00100,0b01000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),
        '-' => g!(0b00000,0b00000,0b00000,0b01110,0b00000,0b00000,0b00000),
        '\'' => g!(0b00100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),

        _ => None,
    }
}

/// Pixel width of `text` drawn at `scale`.
pub fn text_width(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * GLYPH_ADVANCE * scale
}

/// Pixel height of one text line (including leading) at `scale`.
pub fn line_height(scale: i32) -> i32 {
    LINE_ADVANCE * scale
}

/// Greedy word-wrap of `text` into lines no wider than `max_width` pixels at
/// `scale`. Words longer than a full line are broken mid-word. Always returns
/// at least one line for non-empty input.
pub fn wrap_text(text: &str, scale: i32, max_width: i32) -> Vec<String> {
    let max_chars = (max_width / (GLYPH_ADVANCE * scale)).max(1) as usize;
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let mut word = word;
        // Hard-break words that can never fit on one line
        while word.chars().count() > max_chars {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let split = word.char_indices().nth(max_chars).map(|(i, _)| i).unwrap_or(word.len());
            lines.push(word[..split].to_string());
            word = &word[split..];
        }
        let need = word.chars().count() + if line.is_empty() { 0 } else { 1 };
        if line.chars().count() + need > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Draw a single line of text with its top-left corner at (x, y).
/// Each glyph pixel becomes a `scale` x `scale` block.
pub fn draw_text(fb: &mut FrameBuffer, x: i32, y: i32, text: &str, scale: i32, argb: u32) {
    let mut pen_x = x;
    for ch in text.chars() {
        if let Some(rows) = glyph5x7(ch) {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..GLYPH_WIDTH {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        fill_rect(
                            fb,
                            pen_x + rx * scale,
                            y + ry as i32 * scale,
                            pen_x + (rx + 1) * scale,
                            y + (ry as i32 + 1) * scale,
                            argb,
                        );
                    }
                }
            }
        }
        pen_x += GLYPH_ADVANCE * scale;
    }
}
