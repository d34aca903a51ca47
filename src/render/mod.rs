//! Pixel compositing for the lip effect and before/after output.
//!
//! [`apply_color`] blends into detected pixels, [`render_fallback`] paints a
//! fixed ellipse when detection comes back empty, and [`render_comparison`]
//! lays two images side by side.

mod comparison;
mod composite;
mod fallback;

pub use comparison::render_comparison;
pub use composite::{apply_color, blend_channel, blend_factor};
pub use fallback::{render_fallback, Ellipse, OverlayConfig};
