//! facetone - heuristic lip recolouring and filter-chain reshaping
//!
//! Lips are found by colour and position rules inside a proportional box,
//! then recoloured per pixel; when nothing qualifies a fixed ellipse overlay
//! is painted instead. Reshaping is simulated with preset chains of blur,
//! sharpen, modulate and linear-contrast steps. Neither is a landmark model.

pub mod analysis;
pub mod cli;
pub mod codec;
pub mod detect;
pub mod error;
pub mod filter;
pub mod inputs;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod settings;
pub mod types;

pub use analysis::{analyze, AnalysisReport, Recommendation};
pub use codec::{decode, decode_bytes, encode, EncodeOptions};
pub use detect::{detect_region, CandidatePixel, DetectionConfig, RegionBox, ScoreTable};
pub use error::{FaceError, Result};
pub use filter::{apply_filter_chain, build_filter_chain, FilterChain, FilterStep};
pub use pipeline::{apply_lipstick, reshape, LipstickOutcome, Method};
pub use render::{apply_color, render_comparison, render_fallback, OverlayConfig};
pub use settings::Settings;
pub use types::{Channels, Colour, EffectOptions, PixelBuffer, ReshapeKind, ReshapeOptions, Texture};
