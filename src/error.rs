use miette::Diagnostic;
use thiserror::Error;

/// Main error type for facetone operations
#[derive(Error, Diagnostic, Debug)]
pub enum FaceError {
    #[error("Invalid image: {message}")]
    #[diagnostic(code(facetone::image))]
    InvalidImage {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Unknown effect: {name}")]
    #[diagnostic(
        code(facetone::effect),
        help("Known presets: refinement, narrowing, straightening, tip_reshaping, bridge_adjustment")
    )]
    UnknownEffect { name: String },

    #[error("Scan region of {area} pixels exceeds the limit of {limit}")]
    #[diagnostic(
        code(facetone::region),
        help("Downscale the image or raise detection.max_scan_area in facetone.yaml")
    )]
    RegionTooLarge { area: u64, limit: u64 },

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(facetone::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(facetone::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(facetone::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl FaceError {
    pub(crate) fn invalid_image(message: impl Into<String>) -> Self {
        FaceError::InvalidImage {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FaceError>;
