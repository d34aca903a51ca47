//! Lipstick command implementation.
//!
//! Decodes each input, recolours the detected lips (or the fallback ellipse)
//! and writes `<stem>-lipstick.jpg` to the output directory.

use std::path::PathBuf;

use clap::Args;

use crate::codec;
use crate::error::{FaceError, Result};
use crate::inputs::collect_inputs;
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{apply_lipstick, plan_outputs, Method};
use crate::settings::Settings;
use crate::types::{Colour, EffectOptions, Texture};

/// Recolour the lips in one or more portraits
#[derive(Args, Debug)]
pub struct LipstickArgs {
    /// Image files or directories
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Target colour as #RGB or #RRGGBB
    #[arg(long, default_value = "#FF6B6B")]
    pub color: String,

    /// Effect strength, 0-100
    #[arg(long, default_value_t = 70, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub intensity: u8,

    /// Surface finish
    #[arg(long, value_enum, default_value_t = Texture::Satin)]
    pub texture: Texture,

    /// Output directory (default: from facetone.yaml)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Descend into subdirectories
    #[arg(long, short)]
    pub recursive: bool,
}

pub fn run(args: LipstickArgs, settings: &Settings, printer: &Printer) -> Result<()> {
    let colour = Colour::from_hex(&args.color).map_err(|e| FaceError::Parse {
        message: format!("Invalid --color '{}': {}", args.color, e),
        help: Some("Use a hex colour such as #C2185B or #c15".to_string()),
    })?;
    let options = EffectOptions::new(colour, args.intensity, args.texture)?;
    let output_dir = args.output.unwrap_or_else(|| settings.output.clone());

    let files = collect_inputs(&args.inputs, args.recursive)?;
    let plan = plan_outputs(&output_dir, &files, &["lipstick"])?;
    let mut fallbacks = 0;

    for (file, targets) in files.iter().zip(&plan) {
        printer.status("Processing", &display_path(file));
        let buffer = codec::decode(file)?;
        let outcome = apply_lipstick(&buffer, &options, settings)?;

        match outcome.method {
            Method::Detected { candidates } => printer.info(
                "Detected",
                &plural(candidates, "lip pixel", "lip pixels"),
            ),
            Method::Fallback => {
                fallbacks += 1;
                printer.warning("Fallback", "no lips detected, used the default overlay");
            }
        }

        let target = &targets[0];
        codec::encode(&outcome.buffer, target, settings.encode_options())?;
        printer.status("Wrote", &printer.cyan(&display_path(target)));
    }

    let mut summary = format!(
        "{} to {}",
        plural(files.len(), "image", "images"),
        display_path(&output_dir)
    );
    if fallbacks > 0 {
        summary.push_str(&printer.dim(&format!(" ({} fallback)", fallbacks)));
    }
    printer.success("Finished", &summary);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Channels, PixelBuffer};
    use tempfile::tempdir;

    fn args(inputs: Vec<PathBuf>, output: PathBuf) -> LipstickArgs {
        LipstickArgs {
            inputs,
            color: "#C2185B".to_string(),
            intensity: 60,
            texture: Texture::Gloss,
            output: Some(output),
            recursive: false,
        }
    }

    #[test]
    fn test_lipstick_writes_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("face.png");
        let buffer = PixelBuffer::filled(40, 40, Channels::Rgb, &[170, 60, 70]).unwrap();
        codec::encode(&buffer, &input, Default::default()).unwrap();

        let out = dir.path().join("out");
        run(args(vec![input], out.clone()), &Settings::default(), &Printer::plain()).unwrap();

        let written = codec::decode(&out.join("face-lipstick.jpg")).unwrap();
        assert_eq!((written.width(), written.height()), (40, 40));
    }

    #[test]
    fn test_lipstick_rejects_bad_colour() {
        let dir = tempdir().unwrap();
        let mut bad = args(vec![dir.path().join("x.png")], dir.path().join("out"));
        bad.color = "crimson".to_string();

        let err = run(bad, &Settings::default(), &Printer::plain()).unwrap_err();
        assert!(matches!(err, FaceError::Parse { .. }));
    }

    #[test]
    fn test_lipstick_bad_image_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.jpg");
        std::fs::write(&input, b"not a jpeg").unwrap();
        let out = dir.path().join("out");

        let err = run(args(vec![input], out.clone()), &Settings::default(), &Printer::plain())
            .unwrap_err();

        assert!(matches!(err, FaceError::InvalidImage { .. }));
        assert!(!out.join("broken-lipstick.jpg").exists());
    }

    #[test]
    fn test_lipstick_same_stem_inputs_fail_before_writing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in");
        for sub in ["a", "b"] {
            let path = input.join(sub).join("face.png");
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            let buffer = PixelBuffer::filled(20, 20, Channels::Rgb, &[170, 60, 70]).unwrap();
            codec::encode(&buffer, &path, Default::default()).unwrap();
        }
        let out = dir.path().join("out");
        let mut recursive = args(vec![input], out.clone());
        recursive.recursive = true;

        let err = run(recursive, &Settings::default(), &Printer::plain()).unwrap_err();

        assert!(matches!(err, FaceError::Validation { .. }));
        assert!(!out.exists());
    }
}
