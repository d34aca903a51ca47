//! Effect option types shared by the compositing and reshaping stages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FaceError, Result};

use super::Colour;

/// Upper bound of the intensity scale.
pub const MAX_INTENSITY: u8 = 100;

/// Check an intensity against the 0..=100 scale.
pub fn check_intensity(intensity: u8) -> Result<u8> {
    if intensity > MAX_INTENSITY {
        return Err(FaceError::Validation {
            message: format!("Intensity {} is outside 0..=100", intensity),
            help: Some("Intensity is a percentage".to_string()),
        });
    }
    Ok(intensity)
}

/// Finish applied on top of the blended colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Texture {
    Matte,
    Gloss,
    #[default]
    Satin,
    Metallic,
}

impl Texture {
    pub const ALL: [Texture; 4] = [Texture::Matte, Texture::Gloss, Texture::Satin, Texture::Metallic];

    pub fn name(self) -> &'static str {
        match self {
            Texture::Matte => "matte",
            Texture::Gloss => "gloss",
            Texture::Satin => "satin",
            Texture::Metallic => "metallic",
        }
    }

    /// Adjust a raw blend factor for this finish.
    pub fn adjust(self, blend: f64) -> f64 {
        match self {
            Texture::Matte => (blend + 0.2).min(0.9),
            Texture::Gloss => (blend - 0.2).max(0.3),
            Texture::Metallic => (blend + 0.1).min(0.8),
            Texture::Satin => blend,
        }
    }
}

impl fmt::Display for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Texture {
    type Err = FaceError;

    fn from_str(s: &str) -> Result<Self> {
        Texture::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| FaceError::Parse {
                message: format!("Unknown texture: {}", s),
                help: Some("Use matte, gloss, satin or metallic".to_string()),
            })
    }
}

/// Parameters for recolouring detected pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectOptions {
    pub colour: Colour,
    pub intensity: u8,
    pub texture: Texture,
}

impl EffectOptions {
    pub fn new(colour: Colour, intensity: u8, texture: Texture) -> Result<Self> {
        Ok(Self {
            colour,
            intensity: check_intensity(intensity)?,
            texture,
        })
    }

    /// Intensity as a fraction in `[0, 1]`.
    pub fn strength(&self) -> f64 {
        f64::from(self.intensity.min(MAX_INTENSITY)) / 100.0
    }
}

/// Named reshape preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReshapeKind {
    Refinement,
    Narrowing,
    Straightening,
    TipReshaping,
    BridgeAdjustment,
}

impl ReshapeKind {
    pub const ALL: [ReshapeKind; 5] = [
        ReshapeKind::Refinement,
        ReshapeKind::Narrowing,
        ReshapeKind::Straightening,
        ReshapeKind::TipReshaping,
        ReshapeKind::BridgeAdjustment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReshapeKind::Refinement => "refinement",
            ReshapeKind::Narrowing => "narrowing",
            ReshapeKind::Straightening => "straightening",
            ReshapeKind::TipReshaping => "tip_reshaping",
            ReshapeKind::BridgeAdjustment => "bridge_adjustment",
        }
    }
}

impl fmt::Display for ReshapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReshapeKind {
    type Err = FaceError;

    fn from_str(s: &str) -> Result<Self> {
        ReshapeKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| FaceError::UnknownEffect {
                name: s.to_string(),
            })
    }
}

/// Parameters for a reshape filter chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReshapeOptions {
    pub kind: ReshapeKind,
    pub intensity: u8,
    pub preserve_natural_look: bool,
}

impl ReshapeOptions {
    pub fn new(kind: ReshapeKind, intensity: u8, preserve_natural_look: bool) -> Result<Self> {
        Ok(Self {
            kind,
            intensity: check_intensity(intensity)?,
            preserve_natural_look,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_adjust() {
        assert!((Texture::Matte.adjust(0.5) - 0.7).abs() < 1e-12);
        assert_eq!(Texture::Matte.adjust(0.8), 0.9);
        assert_eq!(Texture::Gloss.adjust(0.1), 0.3);
        assert!((Texture::Gloss.adjust(0.9) - 0.7).abs() < 1e-12);
        assert_eq!(Texture::Metallic.adjust(0.75), 0.8);
        assert_eq!(Texture::Satin.adjust(0.42), 0.42);
    }

    #[test]
    fn test_texture_from_str() {
        assert_eq!("gloss".parse::<Texture>().unwrap(), Texture::Gloss);
        assert!("shimmer".parse::<Texture>().is_err());
    }

    #[test]
    fn test_reshape_kind_names_round_trip() {
        for kind in ReshapeKind::ALL {
            assert_eq!(kind.name().parse::<ReshapeKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_reshape_kind() {
        let err = "nose_job".parse::<ReshapeKind>().unwrap_err();
        assert!(matches!(err, FaceError::UnknownEffect { name } if name == "nose_job"));
    }

    #[test]
    fn test_intensity_bounds() {
        assert!(EffectOptions::new(Colour::BLACK, 100, Texture::Satin).is_ok());
        assert!(EffectOptions::new(Colour::BLACK, 101, Texture::Satin).is_err());
        assert!(ReshapeOptions::new(ReshapeKind::Narrowing, 250, false).is_err());
    }

    #[test]
    fn test_effect_options_from_json() {
        let json = r##"{"colour":"#C21E56","intensity":70,"texture":"matte"}"##;
        let options: EffectOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.colour, Colour::rgb(0xC2, 0x1E, 0x56));
        assert_eq!(options.texture, Texture::Matte);
        assert!((options.strength() - 0.7).abs() < 1e-12);
    }
}
