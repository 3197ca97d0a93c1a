// Live demo: the camera preview with the scanning viewfinder painted on top.
//
// What you SEE:
// • Live camera as the base image, darkened outside the scan frame.
// • A laser band sweeping down the frame, corner brackets, a caption.
// • Candidate "result points" flashing inside the frame (simulated decode).
// • Space freezes the display on the current frame (and unfreezes it).
// • P toggles result-point markers, C clears them, ESC quits.

use image::{Rgb, RgbImage};
use scanview::camera::CameraCapture;
use scanview::viewfinder::ViewfinderRenderer;
use scanview::window::ScanWindow;
use scanview::{Error, FrameBuffer, FramingSource, ResultPoint, ViewfinderConfig};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Deterministic xorshift32 RNG; jitters the simulated decode points.
struct Rng32 {
    state: u32,
}

impl Rng32 {
    fn from_seed(seed: u32) -> Self {
        Self { state: seed | 1 }
    }

    #[inline]
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    #[inline]
    fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / ((1u32 << 24) as f32)
    }

    #[inline]
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }
}

/// Copy the live frame into an RGB image for the freeze-frame overlay.
fn snapshot(fb: &FrameBuffer) -> RgbImage {
    let mut img = RgbImage::new(fb.width as u32, fb.height as u32);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let p = fb.pixels[y as usize * fb.width + x as usize];
        *px = Rgb([
            ((p >> 16) & 0xFF) as u8,
            ((p >> 8) & 0xFF) as u8,
            (p & 0xFF) as u8,
        ]);
    }
    img
}

fn main() -> Result<(), Error> {
    /* --- Camera + window setup ---
       Visual: window opens with the live camera feed. */
    let mut cam = CameraCapture::new(0, 640, 480)?;
    let (w, h) = cam.resolution();
    let mut window = ScanWindow::new("ScanView — Viewfinder Demo", w as usize, h as usize)?;

    let config = ViewfinderConfig {
        caption_text: "Align the barcode inside the frame".into(),
        show_result_points: true,
        ..Default::default()
    };
    let mut finder = ViewfinderRenderer::new(config);
    finder.set_framing_source(Box::new(cam.framing()));

    /* --- Simulated decode thread ---
       Visual: small markers flicker inside the frame, like a decoder
       reporting candidate feature points. */
    let running = Arc::new(AtomicBool::new(true));
    let decode = {
        let running = Arc::clone(&running);
        let points = finder.points();
        let frame_hint = cam.framing().framing_rect();
        thread::spawn(move || {
            let mut rng = Rng32::from_seed(0xC0FFEE);
            while running.load(Ordering::Relaxed) {
                if let Some(frame) = frame_hint {
                    let x = rng.range(frame.left as f32, frame.right as f32);
                    let y = rng.range(frame.top as f32, frame.bottom as f32);
                    points.append(ResultPoint::new(x, y));
                }
                thread::sleep(Duration::from_millis(40));
            }
        })
    };

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame. */
    let mut screen = FrameBuffer::new(w as usize, h as usize);

    // The renderer's scheduling contract: repaint the overlay when the last
    // RedrawRequest falls due (or a key changed the state). While frozen the
    // renderer returns no request and the last composed image just stays up.
    let mut next_redraw: Option<Instant> = Some(Instant::now());
    let mut frozen = false;

    /* --- FPS reporting --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    while window.is_open() && !window.esc_pressed() {
        /* 1) Grab a fresh live frame (blocks until the camera has one). */
        let live = cam.next_frame()?;

        /* 2) Inputs */
        if window.space_pressed_once() {
            frozen = !frozen;
            if frozen {
                finder.set_result_overlay(Some(snapshot(&live)));
            } else {
                finder.clear_result_overlay();
            }
            next_redraw = Some(Instant::now());
        }
        if window.p_pressed_once() {
            let show = !finder.show_result_points();
            finder.set_show_result_points(show);
            next_redraw = Some(Instant::now());
        }
        if window.c_pressed_once() {
            finder.points().clear();
        }

        /* 3) Compose preview + overlay when a repaint is due. */
        let due = next_redraw.is_some_and(|t| Instant::now() >= t);
        if due {
            screen.pixels.copy_from_slice(&live.pixels);
            next_redraw = finder
                .render(&mut screen)
                .map(|req| Instant::now() + req.after);
        }

        /* 4) Present (this is when the on-screen image updates). */
        window.present(&screen)?;

        /* 5) FPS counter, once per second to the terminal. */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            println!("FPS: {:.1}", frames_this_second as f32 / secs);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    running.store(false, Ordering::Relaxed);
    let _ = decode.join();
    Ok(())
}
