//! End-to-end effect pipelines.
//!
//! These glue detection, compositing and filter chains together the way the
//! CLI runs them. They take borrowed buffers and return new ones; file I/O
//! stays in [`crate::codec`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::detect::{detect_region, CandidatePixel};
use crate::error::{FaceError, Result};
use crate::filter::{apply_filter_chain, FilterChain};
use crate::render::{apply_color, render_fallback};
use crate::settings::Settings;
use crate::types::{EffectOptions, PixelBuffer, ReshapeOptions};

/// How the lip colour was placed.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    /// Blended into detected pixels.
    Detected { candidates: usize },
    /// Nothing was detected; the fixed ellipse overlay was used.
    Fallback,
}

impl Method {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Method::Fallback)
    }
}

#[derive(Debug, Clone)]
pub struct LipstickOutcome {
    pub buffer: PixelBuffer,
    pub method: Method,
}

/// Detect lips and recolour them, falling back to the ellipse overlay when
/// detection returns no candidates.
pub fn apply_lipstick(
    buffer: &PixelBuffer,
    options: &EffectOptions,
    settings: &Settings,
) -> Result<LipstickOutcome> {
    let candidates: Vec<CandidatePixel> = detect_region(buffer, &settings.detection)?;

    if candidates.is_empty() {
        warn!(
            width = buffer.width(),
            height = buffer.height(),
            "no lip pixels detected, using fallback overlay"
        );
        return Ok(LipstickOutcome {
            buffer: render_fallback(buffer, options, &settings.overlay),
            method: Method::Fallback,
        });
    }

    info!(
        candidates = candidates.len(),
        colour = %options.colour,
        intensity = options.intensity,
        "recolouring detected lips"
    );
    Ok(LipstickOutcome {
        buffer: apply_color(buffer, &candidates, options),
        method: Method::Detected {
            candidates: candidates.len(),
        },
    })
}

/// Run the reshape preset described by `options`.
pub fn reshape(buffer: &PixelBuffer, options: &ReshapeOptions) -> Result<PixelBuffer> {
    let chain = FilterChain::from_options(options)?;
    info!(
        preset = %options.kind,
        intensity = options.intensity,
        natural = options.preserve_natural_look,
        steps = chain.len(),
        "applying reshape preset"
    );
    apply_filter_chain(buffer, chain)
}

/// `<dir>/<stem>-<effect>.jpg` for an input file.
pub fn output_path(dir: &Path, input: &Path, effect: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "image".to_string());
    dir.join(format!("{}-{}.jpg", stem, effect))
}

/// Output paths for every input, one per effect, in `effects` order.
///
/// Fails before anything is read or written if two inputs would produce the
/// same file, e.g. `a/face.png` and `b/face.jpg`.
pub fn plan_outputs(dir: &Path, inputs: &[PathBuf], effects: &[&str]) -> Result<Vec<Vec<PathBuf>>> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    let mut plan = Vec::with_capacity(inputs.len());

    for input in inputs {
        let mut targets = Vec::with_capacity(effects.len());
        for effect in effects {
            let target = output_path(dir, input, effect);
            if let Some(previous) = claimed.insert(target.clone(), input) {
                return Err(FaceError::Validation {
                    message: format!(
                        "{} would be written for both {} and {}",
                        target.display(),
                        previous.display(),
                        input.display()
                    ),
                    help: Some("Rename one of the inputs or process them in separate runs".to_string()),
                });
            }
            targets.push(target);
        }
        plan.push(targets);
    }
    Ok(plan)
}
