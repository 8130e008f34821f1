use std::path::Path;

use image::{DynamicImage, RgbImage};
use crate::{error::Result, landmarks::HandDetections};

/// Trait for hand landmark detectors
pub trait HandLandmarkDetector: Send + Sync {
    /// Load the image at `image_path` and detect hands in it
    fn detect(&self, image_path: &Path) -> Result<(RgbImage, HandDetections)>;
}

/// Trait for background/foreground segmentation
pub trait Segmenter: Send + Sync {
    /// Return a same-size image whose background is dark and foreground bright
    fn segment(&self, image: &RgbImage) -> Result<DynamicImage>;
}

/// Trait for contrast normalisation applied before segmentation
pub trait ContrastEnhancer: Send + Sync {
    fn enhance(&self, image: &RgbImage) -> RgbImage;
}
