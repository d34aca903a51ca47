//! Compare command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::codec;
use crate::error::Result;
use crate::output::{display_path, Printer};
use crate::pipeline::output_path;
use crate::render::render_comparison;
use crate::settings::Settings;

/// Build a side-by-side before/after image
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Original image (sets the output size)
    pub before: PathBuf,

    /// Processed image
    pub after: PathBuf,

    /// Output file (default: <before>-compare.jpg in the output directory)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: CompareArgs, settings: &Settings, printer: &Printer) -> Result<()> {
    let before = codec::decode(&args.before)?;
    let after = codec::decode(&args.after)?;
    let comparison = render_comparison(&before, &after)?;

    let target = args
        .output
        .unwrap_or_else(|| output_path(&settings.output, &args.before, "compare"));
    codec::encode(&comparison, &target, settings.encode_options())?;

    printer.success(
        "Compared",
        &format!(
            "{} {}",
            printer.cyan(&display_path(&target)),
            printer.dim(&format!("({}x{})", comparison.width(), comparison.height()))
        ),
    );
    Ok(())
}
