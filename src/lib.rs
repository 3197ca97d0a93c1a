//! Software-rendered barcode-scanner viewfinder overlay.
//!
//! The overlay is painted on top of a live camera preview, entirely from
//! geometry and color state: a masked scan region, a thin frame border with
//! corner brackets, an animated laser sweep, optional result-point markers
//! fed by a decode loop, an optional caption, and a freeze-frame result
//! overlay. See [`viewfinder::ViewfinderRenderer`] for the per-frame
//! pipeline and the redraw-scheduling contract.

pub mod camera;
pub mod color;
pub mod config;
pub mod draw;
pub mod error;
pub mod points;
pub mod types;
pub mod viewfinder;
pub mod window;

pub use config::{TextLocation, ViewfinderConfig};
pub use error::Error;
pub use points::PointBuffer;
pub use types::{FrameBuffer, Rect, ResultPoint};
pub use viewfinder::{FramingSource, RedrawRequest, ViewfinderRenderer};
