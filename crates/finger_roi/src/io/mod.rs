pub mod landmarks;
pub mod output;

pub use landmarks::JsonLandmarkDetector;
pub use output::OutputDirs;
