use image::{imageops, DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::map::map_colors;
use crate::{
    error::{FingerRoiError, Result},
    traits::ContrastEnhancer,
};

/// BT.601 luma in 14-bit fixed point, rounded
fn luma(Rgb([r, g, b]): Rgb<u8>) -> u8 {
    ((r as u32 * 4899 + g as u32 * 9617 + b as u32 * 1868 + 8192) >> 14) as u8
}

pub fn grayscale(image: &RgbImage) -> GrayImage {
    map_colors(image, |pixel| Luma([luma(pixel)]))
}

/// Turns a segmented RGB image into a binary foreground mask
#[derive(Debug, Clone)]
pub struct MaskBuilder {
    pub threshold: u8,
}

impl Default for MaskBuilder {
    fn default() -> Self {
        Self { threshold: 11 }
    }
}

impl MaskBuilder {
    /// 255 where the grayscale intensity is strictly above the threshold, 0 elsewhere.
    /// Anything other than a three channel image is rejected.
    pub fn build(&self, image: &DynamicImage) -> Result<GrayImage> {
        let channels = image.color().channel_count();
        if channels != 3 {
            return Err(FingerRoiError::InputShape {
                channels,
                width: image.width(),
                height: image.height(),
            });
        }

        let threshold = self.threshold;
        Ok(map_colors(&image.to_rgb8(), |pixel| {
            Luma([if luma(pixel) > threshold { 255 } else { 0 }])
        }))
    }
}

/// Histogram equalisation on the grayscale image, replicated to three channels
#[derive(Debug, Clone, Default)]
pub struct HistogramEqualizer;

impl ContrastEnhancer for HistogramEqualizer {
    fn enhance(&self, image: &RgbImage) -> RgbImage {
        let equalized = imageproc::contrast::equalize_histogram(&grayscale(image));
        DynamicImage::ImageLuma8(equalized).to_rgb8()
    }
}

/// Leaves the image untouched
#[derive(Debug, Clone, Default)]
pub struct NoContrastEnhancement;

impl ContrastEnhancer for NoContrastEnhancement {
    fn enhance(&self, image: &RgbImage) -> RgbImage {
        image.clone()
    }
}

/// Surround the image with a black border of `padding` pixels on every side
pub fn pad_image(image: &RgbImage, padding: u32) -> RgbImage {
    let mut canvas = RgbImage::new(image.width() + 2 * padding, image.height() + 2 * padding);
    imageops::replace(&mut canvas, image, padding as i64, padding as i64);
    canvas
}

/// Scale so the longest side equals `target`, keeping the aspect ratio
pub fn resize_longest_edge(image: &RgbImage, target: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let (new_width, new_height) = if height >= width {
        let aspect_ratio = width as f64 / height as f64;
        ((target as f64 * aspect_ratio) as u32, target)
    } else {
        let aspect_ratio = height as f64 / width as f64;
        (target, (target as f64 * aspect_ratio) as u32)
    };

    imageops::resize(
        image,
        new_width.max(1),
        new_height.max(1),
        imageops::FilterType::Triangle,
    )
}
