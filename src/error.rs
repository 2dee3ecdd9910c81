//! Crate-level error type.

/// Errors produced by the viewer core and its terminal host.
#[derive(thiserror::Error, Debug)]
pub enum ViewerError {
    /// A rotation axis with zero (or non-finite) length.
    #[error("rotation axis must be a non-zero, finite vector")]
    DegenerateAxis,

    /// A window dimension of zero, which would make the aspect ratio undefined.
    #[error("invalid window size {width}x{height}")]
    InvalidWindowSize { width: u32, height: u32 },

    /// A configuration value outside its valid range.
    #[error("config error: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ViewerError {
    pub fn config<T: ToString>(msg: T) -> Self {
        ViewerError::Config(msg.to_string())
    }
}

/// Result type alias for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;
