// ARGB color math on plain u32 values.
// The renderer's configuration colors are 0xAARRGGBB; the framebuffer is
// opaque 0x00RRGGBB, so every draw is a source-over blend against an opaque
// destination.

/// Alpha forced into the "shaded" gradient endpoint of the laser sweep.
pub const SHADE_ALPHA: u32 = 0x20;

#[inline]
pub fn alpha(argb: u32) -> u32 {
    (argb >> 24) & 0xFF
}

#[inline]
pub fn unpack_rgb(argb: u32) -> (u32, u32, u32) {
    ((argb >> 16) & 0xFF, (argb >> 8) & 0xFF, argb & 0xFF)
}

#[inline]
pub fn pack_rgb(r: u32, g: u32, b: u32) -> u32 {
    (r << 16) | (g << 8) | b
}

/// Replace the alpha channel of `argb` with `a`, keeping RGB.
#[inline]
pub fn with_alpha(argb: u32, a: u32) -> u32 {
    (argb & 0x00FF_FFFF) | ((a & 0xFF) << 24)
}

/// The low-alpha variant of a color used as the faded end of the laser
/// gradient. Channel arithmetic, not the hex-string splice the original used.
#[inline]
pub fn shade(argb: u32) -> u32 {
    with_alpha(argb, SHADE_ALPHA)
}

/// Source-over blend of an ARGB color onto an opaque 0x00RRGGBB pixel.
/// Visual: alpha 0xFF paints solid, alpha 0 leaves the pixel untouched.
#[inline]
pub fn blend_over(dst: u32, src_argb: u32) -> u32 {
    let a = alpha(src_argb);
    if a == 0 {
        return dst;
    }
    if a == 0xFF {
        return src_argb & 0x00FF_FFFF;
    }
    let (sr, sg, sb) = unpack_rgb(src_argb);
    let (dr, dg, db) = unpack_rgb(dst);
    let inv = 255 - a;
    // +127 rounds the /255 division to nearest
    let r = (sr * a + dr * inv + 127) / 255;
    let g = (sg * a + dg * inv + 127) / 255;
    let b = (sb * a + db * inv + 127) / 255;
    pack_rgb(r, g, b)
}

/// Linear interpolation between two ARGB colors, all four channels,
/// `t` in [0, 1]. Used for the laser sweep's vertical gradient.
#[inline]
pub fn lerp(from: u32, to: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let ch = |f: u32, g: u32| -> u32 {
        (f as f32 + (g as f32 - f as f32) * t).round() as u32
    };
    let a = ch(alpha(from), alpha(to));
    let (fr, fg, fb) = unpack_rgb(from);
    let (tr, tg, tb) = unpack_rgb(to);
    with_alpha(pack_rgb(ch(fr, tr), ch(fg, tg), ch(fb, tb)), a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_replaces_alpha_and_keeps_rgb() {
        assert_eq!(shade(0xFF1F_B3E2), 0x201F_B3E2);
        assert_eq!(shade(0x0012_3456), 0x2012_3456);
    }

    #[test]
    fn blend_extremes() {
        assert_eq!(blend_over(0x0011_2233, 0x00AA_BBCC), 0x0011_2233); // alpha 0
        assert_eq!(blend_over(0x0011_2233, 0xFFAA_BBCC), 0x00AA_BBCC); // opaque
    }

    #[test]
    fn blend_half_alpha_meets_halfway() {
        // 0x80/255 over black: each channel lands at ~src/2
        let out = blend_over(0x0000_0000, 0x80FF_FF00);
        let (r, g, b) = unpack_rgb(out);
        assert_eq!((r, g, b), (128, 128, 0));
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let from = 0x2000_0000;
        let to = 0xFF00_00FF;
        assert_eq!(lerp(from, to, 0.0), from);
        assert_eq!(lerp(from, to, 1.0), to);
        let mid = lerp(from, to, 0.5);
        assert_eq!(alpha(mid), 0x90); // (0x20 + 0xFF) / 2, rounded
    }
}
