//! Analyze command implementation.
//!
//! Prints the report to stdout, as JSON with `--json`.

use std::path::PathBuf;

use clap::Args;

use crate::analysis::{analyze, AnalysisReport};
use crate::codec;
use crate::error::{FaceError, Result};

/// Describe an image and suggest presets
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Image to analyse
    pub input: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let buffer = codec::decode(&args.input)?;
    let report = analyze(&buffer);
    println!("{}", render(&report, args.json)?);
    Ok(())
}

fn render(report: &AnalysisReport, json: bool) -> Result<String> {
    if json {
        serde_json::to_string_pretty(report).map_err(|e| FaceError::Parse {
            message: format!("Failed to serialize report: {}", e),
            help: None,
        })
    } else {
        Ok(report.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Channels, PixelBuffer};

    #[test]
    fn test_render_text_report() {
        let report = analyze(&PixelBuffer::filled(4, 6, Channels::Rgb, &[128, 128, 128]).unwrap());
        insta::assert_snapshot!(render(&report, false).unwrap(), @r###"
        size: 4x6 (Portrait)
        brightness: 128.0 (Balanced)
        contrast: 0.0 (Flat)
        warmth: 0.0 (Neutral)
        recommend tip_reshaping: extra definition for a flat image
        "###);
    }

    #[test]
    fn test_render_json_report() {
        let report = analyze(&PixelBuffer::filled(4, 6, Channels::Rgb, &[128, 128, 128]).unwrap());
        let json: serde_json::Value = serde_json::from_str(&render(&report, true).unwrap()).unwrap();
        assert_eq!(json["orientation"], "portrait");
        assert_eq!(json["height"], 6);
    }
}
