pub mod analyze;
pub mod compare;
pub mod completions;
pub mod init;
pub mod lipstick;
pub mod reshape;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};

use crate::error::Result;
use crate::settings::Settings;

/// facetone - heuristic lip recolouring and filter-chain reshaping
#[derive(Parser, Debug)]
#[command(name = "facetone")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings file (default: ./facetone.yaml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recolour the lips in one or more portraits
    Lipstick(lipstick::LipstickArgs),

    /// Apply a reshape filter preset
    Reshape(reshape::ReshapeArgs),

    /// Build a side-by-side before/after image
    Compare(compare::CompareArgs),

    /// Describe an image and suggest presets
    Analyze(analyze::AnalyzeArgs),

    /// Write a default facetone.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Load `config` if given, otherwise look in the working directory.
pub fn load_settings(config: Option<&Path>) -> Result<Settings> {
    match config {
        Some(path) => Settings::load(path),
        None => Settings::discover(Path::new(".")),
    }
}
