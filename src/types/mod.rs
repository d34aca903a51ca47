//! Core domain types for facetone.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `PixelBuffer` - raw RGB/RGBA pixel data with validated dimensions
//! - `Colour` - target shades
//! - `EffectOptions` / `ReshapeOptions` - per-call effect parameters

mod buffer;
mod colour;
mod options;

pub use buffer::{Channels, PixelBuffer};
pub use colour::Colour;
pub use options::{
    check_intensity, EffectOptions, ReshapeKind, ReshapeOptions, Texture, MAX_INTENSITY,
};
