//! # Finger ROI Extraction Library
//!
//! Turns a hand photograph plus its 21 hand landmarks into one rotated,
//! axis-aligned crop per finger, cut from the binary hand mask.
//!
//! ## Core Features
//!
//! - **Trait-based Architecture**: landmark detection, segmentation and contrast
//!   enhancement are collaborators behind traits
//! - **Geometry Primitives**: contour extraction, nearest-contour-point search and
//!   minimum-area rotated rectangles
//! - **Coordinate Tracking**: joint landmarks are mapped into each crop's frame and marked
//! - **Configurable**: thresholds, margins and the finger list come from TOML or JSON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use finger_roi::{FingerRoiPipeline, OutputDirs};
//! use std::path::Path;
//!
//! // Landmarks are read from `hand.json` next to the image
//! let pipeline = FingerRoiPipeline::builder().build()?;
//!
//! let outputs = OutputDirs::new("out/masks", "out/fingers");
//! let report = pipeline.process_path(Path::new("hand.jpg"), &outputs)?;
//! println!("{report:?}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use finger_roi::{FingerRoiPipeline, Finger, FileSegmenter, JsonLandmarkDetector, NoContrastEnhancement};
//!
//! let pipeline = FingerRoiPipeline::builder()
//!     .with_detector(JsonLandmarkDetector::from_file("landmarks.json"))
//!     .with_segmenter(FileSegmenter::open("segmented.png")?)
//!     .with_contrast_enhancer(NoContrastEnhancement)
//!     .with_fingers(vec![Finger::Index, Finger::Middle])
//!     .with_overlay()
//!     .build()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod landmarks;
pub mod config;
pub mod traits;
pub mod algorithms;
pub mod io;
pub mod pipeline;

// Re-exports for convenience
pub use error::{FingerRoiError, Result};
pub use types::{AffineMatrix, Contour, ContourNeighbors, PixelPoint, RotatedRect};
pub use landmarks::{Finger, FingerLandmarks, HandDetections, NormalizedLandmark};
pub use config::PipelineConfig;
pub use traits::*;
pub use algorithms::*;
pub use io::*;
pub use pipeline::{FingerRoi, FingerRoiPipeline, HandRois, ProcessReport, builder::FingerRoiPipelineBuilder};

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use imageproc::point::Point;

    fn create_test_mask() -> GrayImage {
        let mut img = GrayImage::new(100, 100);
        for y in 20..80 {
            for x in 30..70 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
        img
    }

    #[test]
    fn test_contour_feeds_nearest_search() {
        let contour = ImageprocContourExtractor::default()
            .extract(&create_test_mask())
            .expect("Should find the rectangle");

        let landmarks = vec![Point::new(50, 50)];
        let neighbors = closest_contour_points(&landmarks, &contour, &[])
            .expect("Should find neighbours");

        assert_eq!(neighbors[0].left.x, 30);
        assert_eq!(neighbors[0].right.x, 69);
    }

    #[test]
    fn test_rect_of_contour_is_portrait() {
        let contour = ImageprocContourExtractor::default()
            .extract(&create_test_mask())
            .expect("Should find the rectangle");

        let rect = min_area_rect(&contour.points).expect("Should fit a rectangle");
        assert!(rect.width <= rect.height);
        assert!((rect.width - 39.0).abs() < 1e-6);
        assert!((rect.height - 59.0).abs() < 1e-6);
    }
}
