use imageproc::point::Point;
use crate::{landmarks::NormalizedLandmark, types::PixelPoint};

/// Map one normalised landmark onto a `width` x `height` pixel grid, truncating
pub fn landmark_to_pixels(
    landmarks: &[NormalizedLandmark],
    index: usize,
    width: u32,
    height: u32,
) -> PixelPoint {
    let landmark = landmarks[index];
    Point::new(
        (landmark.x as f64 * width as f64) as i32,
        (landmark.y as f64 * height as f64) as i32,
    )
}

/// Pixel coordinates for a whole hand, index-aligned with the input
pub fn landmarks_to_pixel_coordinates(
    landmarks: &[NormalizedLandmark],
    width: u32,
    height: u32,
) -> Vec<PixelPoint> {
    (0..landmarks.len())
        .map(|index| landmark_to_pixels(landmarks, index, width, height))
        .collect()
}
