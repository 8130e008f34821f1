use std::path::Path;

use image::{DynamicImage, RgbImage};
use tracing::debug;
use crate::{
    algorithms::preprocessing::resize_longest_edge,
    error::{FingerRoiError, Result},
    traits::Segmenter,
};

/// For sources whose background has already been removed.
/// Pair with `NoContrastEnhancement`: an equalised background is no longer dark.
#[derive(Debug, Clone, Default)]
pub struct PassthroughSegmenter;

impl Segmenter for PassthroughSegmenter {
    fn segment(&self, image: &RgbImage) -> Result<DynamicImage> {
        Ok(DynamicImage::ImageRgb8(image.clone()))
    }
}

/// Serves a segmentation computed ahead of time by an external tool.
/// Any alpha channel is dropped. The image must match the source size, or the
/// source must be this image scaled down by its longest edge.
#[derive(Debug, Clone)]
pub struct FileSegmenter {
    segmented: RgbImage,
}

impl FileSegmenter {
    pub fn new(segmented: RgbImage) -> Self {
        Self { segmented }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let segmented = image::open(path)?.to_rgb8();
        debug!(path = %path.display(), width = segmented.width(), height = segmented.height(), "loaded segmentation");
        Ok(Self::new(segmented))
    }
}

impl Segmenter for FileSegmenter {
    fn segment(&self, image: &RgbImage) -> Result<DynamicImage> {
        if image.dimensions() == self.segmented.dimensions() {
            return Ok(DynamicImage::ImageRgb8(self.segmented.clone()));
        }

        let (width, height) = image.dimensions();
        let resized = resize_longest_edge(&self.segmented, width.max(height));
        if resized.dimensions() != image.dimensions() {
            return Err(FingerRoiError::DimensionMismatch {
                expected: image.dimensions(),
                actual: self.segmented.dimensions(),
            });
        }

        debug!(width, height, "resized segmentation to match source");
        Ok(DynamicImage::ImageRgb8(resized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba, RgbaImage};

    #[test]
    fn test_passthrough_returns_input() {
        let image = RgbImage::from_pixel(4, 3, Rgb([1, 2, 3]));
        let segmented = PassthroughSegmenter.segment(&image).unwrap();
        assert_eq!(segmented.to_rgb8(), image);
    }

    #[test]
    fn test_file_segmenter_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("segmented.png");
        RgbaImage::from_pixel(8, 6, Rgba([200, 200, 200, 0])).save(&path).unwrap();

        let segmenter = FileSegmenter::open(&path).unwrap();
        let segmented = segmenter.segment(&RgbImage::new(8, 6)).unwrap();
        assert_eq!(segmented.color().channel_count(), 3);
    }

    #[test]
    fn test_file_segmenter_follows_longest_edge_resize() {
        let segmenter = FileSegmenter::new(RgbImage::from_pixel(640, 480, Rgb([255, 255, 255])));
        let source = resize_longest_edge(&RgbImage::new(640, 480), 320);

        let segmented = segmenter.segment(&source).unwrap().to_rgb8();
        assert_eq!(segmented.dimensions(), (320, 240));
        assert_eq!(*segmented.get_pixel(160, 120), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_file_segmenter_size_mismatch() {
        let segmenter = FileSegmenter::new(RgbImage::new(8, 6));
        assert!(matches!(
            segmenter.segment(&RgbImage::new(6, 8)),
            Err(FingerRoiError::DimensionMismatch { expected: (6, 8), actual: (8, 6) })
        ));
    }
}
