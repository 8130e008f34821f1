use thiserror::Error;

#[derive(Error, Debug)]
pub enum FingerRoiError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Expected an RGB image with 3 channels, received {channels} channel(s) ({width}x{height})")]
    InputShape { channels: u8, width: u32, height: u32 },

    #[error("No foreground found: the mask contains no contours")]
    NoForeground,

    #[error("Contour is empty, cannot search for nearest contour points")]
    EmptyContour,

    #[error("Expected {expected} hand landmarks, received {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("Cannot fit a rotated rectangle to an empty point set")]
    EmptyPointSet,

    #[error("Geometric computation error: {0}")]
    GeometricComputation(String),

    #[error("Segmentation output is {actual:?}, expected {expected:?}")]
    DimensionMismatch { expected: (u32, u32), actual: (u32, u32) },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FingerRoiError>;
