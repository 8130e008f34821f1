use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::debug;
use crate::{
    error::Result,
    landmarks::HandDetections,
    traits::HandLandmarkDetector,
};

/// Reads hand landmarks produced by an external detector from JSON.
///
/// With no explicit file the detector looks for a sidecar next to the image
/// (`hand.jpg` -> `hand.json`).
#[derive(Debug, Clone, Default)]
pub struct JsonLandmarkDetector {
    landmarks_path: Option<PathBuf>,
}

impl JsonLandmarkDetector {
    pub fn sidecar() -> Self {
        Self { landmarks_path: None }
    }

    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Self { landmarks_path: Some(path.into()) }
    }

    pub fn landmarks_path_for(&self, image_path: &Path) -> PathBuf {
        self.landmarks_path
            .clone()
            .unwrap_or_else(|| image_path.with_extension("json"))
    }
}

impl HandLandmarkDetector for JsonLandmarkDetector {
    fn detect(&self, image_path: &Path) -> Result<(RgbImage, HandDetections)> {
        let image = image::open(image_path)?.to_rgb8();

        let landmarks_path = self.landmarks_path_for(image_path);
        let detections = HandDetections::from_json(&fs::read_to_string(&landmarks_path)?)?;
        debug!(
            path = %landmarks_path.display(),
            hands = detections.hand_landmarks.len(),
            "loaded hand landmarks"
        );

        Ok((image, detections))
    }
}
