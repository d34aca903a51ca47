//! Init command implementation.
//!
//! Writes a `facetone.yaml` holding every default, ready to be tuned.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{FaceError, Result};
use crate::output::{display_path, Printer};
use crate::settings::{Settings, SETTINGS_FILENAME};

/// Write a default facetone.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing facetone.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let settings_path = args.path.join(SETTINGS_FILENAME);

    if settings_path.exists() && !args.force {
        return Err(FaceError::Validation {
            message: format!("{} already exists", SETTINGS_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let mut yaml = String::from("# facetone settings. Detection thresholds are heuristic defaults.\n");
    yaml.push_str(&Settings::default().to_yaml()?);

    fs::write(&settings_path, &yaml).map_err(|e| FaceError::Io {
        path: settings_path.clone(),
        message: format!("Failed to write settings: {}", e),
    })?;

    printer.success("Created", &display_path(&settings_path));
    Ok(())
}
