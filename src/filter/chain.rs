//! Reshape presets expressed as filter chains.
//!
//! Every preset is a fixed list of step templates whose parameters are
//! linear in `t = intensity / 100`, optionally floored. Adding a preset means
//! adding a `ReshapeKind` variant, and the exhaustive match in
//! [`preset_template`] will not compile until it has a table entry.

use std::fmt;

use crate::error::Result;
use crate::types::{check_intensity, ReshapeKind, ReshapeOptions};

/// Sharpen gains used when only a sigma is given.
pub const DEFAULT_FLAT: f64 = 1.0;
pub const DEFAULT_JAGGED: f64 = 2.0;

/// One adjustment in a chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterStep {
    Blur {
        sigma: f64,
    },
    Sharpen {
        sigma: f64,
        flat: f64,
        jagged: f64,
    },
    Modulate {
        brightness: f64,
        saturation: f64,
        hue: f64,
    },
    LinearContrast {
        slope: f64,
        intercept: f64,
    },
}

impl fmt::Display for FilterStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterStep::Blur { sigma } => write!(f, "blur sigma={:.3}", sigma),
            FilterStep::Sharpen {
                sigma,
                flat,
                jagged,
            } => write!(
                f,
                "sharpen sigma={:.3} flat={:.3} jagged={:.3}",
                sigma, flat, jagged
            ),
            FilterStep::Modulate {
                brightness,
                saturation,
                hue,
            } => write!(
                f,
                "modulate brightness={:.3} saturation={:.3} hue={:.1}",
                brightness, saturation, hue
            ),
            FilterStep::LinearContrast { slope, intercept } => {
                write!(f, "linear slope={:.3} intercept={:.3}", slope, intercept)
            }
        }
    }
}

/// A parameter of the form `max(floor, base + per_unit * t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficient {
    pub base: f64,
    pub per_unit: f64,
    pub floor: f64,
}

impl Coefficient {
    /// A value that does not depend on intensity.
    pub const fn fixed(value: f64) -> Self {
        Self {
            base: value,
            per_unit: 0.0,
            floor: f64::NEG_INFINITY,
        }
    }

    pub const fn linear(base: f64, per_unit: f64) -> Self {
        Self {
            base,
            per_unit,
            floor: f64::NEG_INFINITY,
        }
    }

    pub const fn floored(self, floor: f64) -> Self {
        Self { floor, ..self }
    }

    pub fn at(&self, t: f64) -> f64 {
        (self.base + self.per_unit * t).max(self.floor)
    }
}

/// A step whose parameters are still functions of intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepTemplate {
    Blur {
        sigma: Coefficient,
    },
    Sharpen {
        sigma: Coefficient,
        flat: Coefficient,
        jagged: Coefficient,
    },
    Modulate {
        brightness: Coefficient,
        saturation: Coefficient,
        hue: Coefficient,
    },
    LinearContrast {
        slope: Coefficient,
        intercept: Coefficient,
    },
}

impl StepTemplate {
    pub fn resolve(&self, t: f64) -> FilterStep {
        match self {
            StepTemplate::Blur { sigma } => FilterStep::Blur { sigma: sigma.at(t) },
            StepTemplate::Sharpen {
                sigma,
                flat,
                jagged,
            } => FilterStep::Sharpen {
                sigma: sigma.at(t),
                flat: flat.at(t),
                jagged: jagged.at(t),
            },
            StepTemplate::Modulate {
                brightness,
                saturation,
                hue,
            } => FilterStep::Modulate {
                brightness: brightness.at(t),
                saturation: saturation.at(t),
                hue: hue.at(t),
            },
            StepTemplate::LinearContrast { slope, intercept } => FilterStep::LinearContrast {
                slope: slope.at(t),
                intercept: intercept.at(t),
            },
        }
    }
}

const fn fixed(value: f64) -> Coefficient {
    Coefficient::fixed(value)
}

const fn linear(base: f64, per_unit: f64) -> Coefficient {
    Coefficient::linear(base, per_unit)
}

const fn sharpen_sigma(sigma: Coefficient) -> StepTemplate {
    StepTemplate::Sharpen {
        sigma,
        flat: fixed(DEFAULT_FLAT),
        jagged: fixed(DEFAULT_JAGGED),
    }
}

// smoothing = 0.8t; sharpen sigma = max(0.5, 1 - smoothing)
const REFINEMENT: &[StepTemplate] = &[
    StepTemplate::Blur {
        sigma: linear(0.0, 0.8),
    },
    sharpen_sigma(linear(1.0, -0.8).floored(0.5)),
    StepTemplate::Modulate {
        brightness: linear(1.0, 0.2),
        saturation: linear(1.0, -0.1),
        hue: fixed(0.0),
    },
];

// contrast = 1 + t/2, shadow = 0.3t; intercept = -(contrast - 1) * 128
const NARROWING: &[StepTemplate] = &[
    StepTemplate::Modulate {
        brightness: linear(1.0, -0.03),
        saturation: linear(1.0, 0.06),
        hue: fixed(0.0),
    },
    StepTemplate::LinearContrast {
        slope: linear(1.0, 0.5),
        intercept: linear(0.0, -64.0),
    },
    sharpen_sigma(fixed(1.2)),
];

// strength = 2t, boost = 1 + t/3; intercept = -(boost - 1) * 64
const STRAIGHTENING: &[StepTemplate] = &[
    StepTemplate::Sharpen {
        sigma: linear(0.0, 2.0),
        flat: fixed(1.2),
        jagged: fixed(1.5),
    },
    StepTemplate::Modulate {
        brightness: linear(1.0, 0.1),
        saturation: fixed(1.05),
        hue: fixed(0.0),
    },
    StepTemplate::LinearContrast {
        slope: linear(1.0, 1.0 / 3.0),
        intercept: linear(0.0, -64.0 / 3.0),
    },
];

// definition = 1.8t, highlight = 0.15t
const TIP_RESHAPING: &[StepTemplate] = &[
    StepTemplate::Sharpen {
        sigma: linear(0.0, 1.8),
        flat: fixed(1.0),
        jagged: fixed(2.0),
    },
    StepTemplate::Modulate {
        brightness: linear(1.0, 0.15),
        saturation: fixed(1.1),
        hue: fixed(2.0),
    },
];

// highlight = 0.2t, depth = 0.15t
const BRIDGE_ADJUSTMENT: &[StepTemplate] = &[
    StepTemplate::Modulate {
        brightness: linear(1.0, 0.2),
        saturation: linear(1.0, -0.15),
        hue: fixed(-1.0),
    },
    StepTemplate::Sharpen {
        sigma: fixed(1.5),
        flat: fixed(1.3),
        jagged: fixed(1.0),
    },
    StepTemplate::LinearContrast {
        slope: fixed(1.1),
        intercept: fixed(-13.0),
    },
];

/// Appended when a natural look is requested.
const NATURAL_LOOK: &[StepTemplate] = &[
    StepTemplate::Modulate {
        brightness: fixed(1.02),
        saturation: fixed(1.05),
        hue: fixed(0.0),
    },
    StepTemplate::Sharpen {
        sigma: fixed(0.8),
        flat: fixed(1.0),
        jagged: fixed(0.5),
    },
    StepTemplate::Blur { sigma: fixed(0.3) },
    StepTemplate::Sharpen {
        sigma: fixed(1.0),
        flat: fixed(1.0),
        jagged: fixed(1.0),
    },
];

/// Coefficient table for a preset.
pub fn preset_template(kind: ReshapeKind) -> &'static [StepTemplate] {
    match kind {
        ReshapeKind::Refinement => REFINEMENT,
        ReshapeKind::Narrowing => NARROWING,
        ReshapeKind::Straightening => STRAIGHTENING,
        ReshapeKind::TipReshaping => TIP_RESHAPING,
        ReshapeKind::BridgeAdjustment => BRIDGE_ADJUSTMENT,
    }
}

/// Ordered steps for one reshape call.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChain {
    steps: Vec<FilterStep>,
}

impl FilterChain {
    /// Resolve a preset at the given intensity.
    pub fn for_preset(kind: ReshapeKind, intensity: u8, preserve_natural_look: bool) -> Result<Self> {
        let t = f64::from(check_intensity(intensity)?) / 100.0;
        let mut steps: Vec<FilterStep> = preset_template(kind).iter().map(|s| s.resolve(t)).collect();
        if preserve_natural_look {
            steps.extend(NATURAL_LOOK.iter().map(|s| s.resolve(t)));
        }
        Ok(Self { steps })
    }

    pub fn from_options(options: &ReshapeOptions) -> Result<Self> {
        Self::for_preset(options.kind, options.intensity, options.preserve_natural_look)
    }

    pub fn from_steps(steps: Vec<FilterStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[FilterStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl IntoIterator for FilterChain {
    type Item = FilterStep;
    type IntoIter = std::vec::IntoIter<FilterStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

/// Build a chain from a preset name.
///
/// Unknown names fail with `UnknownEffect` before any pixel work happens.
pub fn build_filter_chain(
    preset: &str,
    intensity: u8,
    preserve_natural_look: bool,
) -> Result<FilterChain> {
    let kind: ReshapeKind = preset.parse()?;
    FilterChain::for_preset(kind, intensity, preserve_natural_look)
}
