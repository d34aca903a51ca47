//! Reshape command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::codec;
use crate::error::Result;
use crate::filter::FilterChain;
use crate::inputs::collect_inputs;
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{plan_outputs, reshape};
use crate::render::render_comparison;
use crate::settings::Settings;
use crate::types::{ReshapeKind, ReshapeOptions};

/// Apply a reshape filter preset
#[derive(Args, Debug)]
pub struct ReshapeArgs {
    /// Image files or directories
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Preset: refinement, narrowing, straightening, tip_reshaping, bridge_adjustment
    #[arg(long, default_value = "refinement")]
    pub kind: String,

    /// Effect strength, 0-100
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub intensity: u8,

    /// Finish with a softening pass
    #[arg(long)]
    pub natural: bool,

    /// Also write a before/after comparison
    #[arg(long)]
    pub compare: bool,

    /// Output directory (default: from facetone.yaml)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Descend into subdirectories
    #[arg(long, short)]
    pub recursive: bool,
}

pub fn run(args: ReshapeArgs, settings: &Settings, printer: &Printer) -> Result<()> {
    // Resolve the preset before touching any file.
    let kind: ReshapeKind = args.kind.parse()?;
    let options = ReshapeOptions::new(kind, args.intensity, args.natural)?;
    let chain = FilterChain::from_options(&options)?;
    for step in chain.steps() {
        printer.info("Step", &printer.dim(&step.to_string()));
    }

    let output_dir = args.output.unwrap_or_else(|| settings.output.clone());
    let files = collect_inputs(&args.inputs, args.recursive)?;

    let compare_effect = format!("{}-compare", kind.name());
    let mut effects = vec![kind.name()];
    if args.compare {
        effects.push(&compare_effect);
    }
    let plan = plan_outputs(&output_dir, &files, &effects)?;

    for (file, targets) in files.iter().zip(&plan) {
        printer.status("Processing", &display_path(file));
        let before = codec::decode(file)?;
        let after = reshape(&before, &options)?;

        codec::encode(&after, &targets[0], settings.encode_options())?;
        printer.status("Wrote", &printer.cyan(&display_path(&targets[0])));

        if let Some(target) = targets.get(1) {
            let comparison = render_comparison(&before, &after)?;
            codec::encode(&comparison, target, settings.encode_options())?;
            printer.status("Wrote", &printer.cyan(&display_path(target)));
        }
    }

    printer.success(
        "Finished",
        &format!(
            "{} {} to {}",
            printer.bold(kind.name()),
            plural(files.len(), "image", "images"),
            display_path(&output_dir)
        ),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FaceError;
    use crate::types::{Channels, PixelBuffer};
    use tempfile::tempdir;

    fn args(inputs: Vec<PathBuf>, kind: &str, output: PathBuf) -> ReshapeArgs {
        ReshapeArgs {
            inputs,
            kind: kind.to_string(),
            intensity: 40,
            natural: false,
            compare: false,
            output: Some(output),
            recursive: false,
        }
    }

    fn write_input(dir: &std::path::Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let buffer = PixelBuffer::filled(30, 20, Channels::Rgb, &[120, 100, 90]).unwrap();
        codec::encode(&buffer, &path, Default::default()).unwrap();
        path
    }

    #[test]
    fn test_reshape_with_comparison() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "nose.png");
        let out = dir.path().join("out");
        let mut a = args(vec![input], "tip_reshaping", out.clone());
        a.compare = true;
        a.natural = true;

        run(a, &Settings::default(), &Printer::plain()).unwrap();

        let reshaped = codec::decode(&out.join("nose-tip_reshaping.jpg")).unwrap();
        let comparison = codec::decode(&out.join("nose-tip_reshaping-compare.jpg")).unwrap();
        assert_eq!((reshaped.width(), reshaped.height()), (30, 20));
        assert_eq!((comparison.width(), comparison.height()), (30, 20));
    }

    #[test]
    fn test_unknown_preset_fails_before_reading() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "nose.png");
        let out = dir.path().join("out");

        let err = run(
            args(vec![input], "not_a_real_preset", out.clone()),
            &Settings::default(),
            &Printer::plain(),
        )
        .unwrap_err();

        assert!(matches!(err, FaceError::UnknownEffect { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_reshape_same_stem_different_extension_fails() {
        let dir = tempdir().unwrap();
        let png = write_input(dir.path(), "face.png");
        let jpg = write_input(dir.path(), "face.jpg");
        let out = dir.path().join("out");

        let err = run(
            args(vec![png, jpg], "narrowing", out.clone()),
            &Settings::default(),
            &Printer::plain(),
        )
        .unwrap_err();

        assert!(matches!(err, FaceError::Validation { .. }));
        assert!(!out.exists());
    }
}
