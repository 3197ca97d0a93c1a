// Opens the default camera and converts frames into a buffer suitable for
// the window, and derives the framing rectangle the viewfinder scans inside.

use crate::error::Error;
use crate::types::{FrameBuffer, Rect};
use crate::viewfinder::FramingSource;

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

// Framing rectangle sizing: 5/8 of the preview, clamped to usable bounds.
const MIN_FRAME_DIM: i32 = 240;
const MAX_FRAME_WIDTH: i32 = 1200;
const MAX_FRAME_HEIGHT: i32 = 675;

// A small wrapper around nokhwa::Camera so the main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Try to open a camera at a target resolution (falls back if not exact).
    /// On success, nothing is shown on screen yet; we just hold an open stream.
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );

        // Ask for RGB frames, prioritizing the format closest to our request.
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam =
            Camera::new(idx, req).map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }

    /// Grab one frame from the camera and convert it to 0x00RRGGBB pixels.
    /// Visual: after the host pushes this buffer to the window, the live
    /// camera image updates by one frame.
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        // Decode to an ImageBuffer<Rgb<u8>, Vec<u8>> regardless of the raw format.
        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let (w, h) = rgb_img.dimensions();
        let mut out = Vec::with_capacity((w as usize) * (h as usize));
        for (_x, _y, pixel) in rgb_img.enumerate_pixels() {
            // Each `pixel` is RGB<u8>. We pack it as 0x00RRGGBB.
            let r = pixel[0] as u32;
            let g = pixel[1] as u32;
            let b = pixel[2] as u32;
            out.push((r << 16) | (g << 8) | b);
        }

        Ok(FrameBuffer {
            width: w as usize,
            height: h as usize,
            pixels: out,
        })
    }

    /// Report the actual resolution the camera is delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Framing-rect provider to hand to the renderer. Detached from the
    /// camera handle so the handle itself stays free for frame grabbing.
    pub fn framing(&self) -> CameraFraming {
        CameraFraming {
            width: self.width as i32,
            height: self.height as i32,
        }
    }
}

/// Centered scan region derived from the preview resolution: 5/8 of each
/// dimension, clamped, never larger than the preview itself.
#[derive(Clone, Copy, Debug)]
pub struct CameraFraming {
    width: i32,
    height: i32,
}

impl CameraFraming {
    fn desired_dimension(resolution: i32, hard_max: i32) -> i32 {
        let dim = resolution * 5 / 8;
        dim.clamp(MIN_FRAME_DIM, hard_max).min(resolution)
    }
}

impl FramingSource for CameraFraming {
    fn framing_rect(&self) -> Option<Rect> {
        if self.width <= 0 || self.height <= 0 {
            return None;
        }
        let fw = Self::desired_dimension(self.width, MAX_FRAME_WIDTH);
        let fh = Self::desired_dimension(self.height, MAX_FRAME_HEIGHT);
        let left = (self.width - fw) / 2;
        let top = (self.height - fh) / 2;
        Some(Rect::new(left, top, left + fw, top + fh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framing_rect_is_centered_five_eighths() {
        let f = CameraFraming { width: 640, height: 480 };
        let rect = f.framing_rect().unwrap();
        assert_eq!(rect.width(), 400); // 640 * 5/8
        assert_eq!(rect.height(), 300); // 480 * 5/8
        assert_eq!(rect.left, 120);
        assert_eq!(rect.top, 90);
    }

    #[test]
    fn framing_rect_never_exceeds_a_tiny_preview() {
        let f = CameraFraming { width: 200, height: 160 };
        let rect = f.framing_rect().unwrap();
        assert!(rect.width() <= 200);
        assert!(rect.height() <= 160);
        assert!(rect.left >= 0 && rect.top >= 0);
    }

    #[test]
    fn framing_rect_clamps_huge_previews() {
        let f = CameraFraming { width: 4000, height: 2000 };
        let rect = f.framing_rect().unwrap();
        assert_eq!(rect.width(), MAX_FRAME_WIDTH);
        assert_eq!(rect.height(), MAX_FRAME_HEIGHT);
    }

    #[test]
    fn degenerate_preview_yields_no_rect() {
        let f = CameraFraming { width: 0, height: 480 };
        assert!(f.framing_rect().is_none());
    }
}
