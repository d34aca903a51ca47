//! Heuristic feature detection.
//!
//! There is no trained model here: pixels are scored by hand-tuned colour
//! and position rules from [`ScoreTable`]. Treat the results as a best guess
//! for frontal portraits, not as a reliable detector.

mod config;
mod region;

pub use config::{DetectionConfig, PixelRect, RegionBox, ScoreTable, DEFAULT_MAX_SCAN_AREA};
pub use region::{colour_score, confidence, detect_region, position_score, scan_rect, CandidatePixel};
