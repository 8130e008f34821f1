use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use crate::types::{ContourNeighbors, PixelPoint};

const LANDMARK_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const NEIGHBOR_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const CONNECTION_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const OVERLAY_RADIUS: i32 = 3;

/// Filled circle marker; parts outside the canvas are clipped
pub fn draw_marker(canvas: &mut RgbImage, at: PixelPoint, radius: i32, color: Rgb<u8>) {
    draw_filled_circle_mut(canvas, (at.x, at.y), radius, color);
}

fn as_f32(p: PixelPoint) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

/// Debug overlay: landmarks in red, their contour neighbours in blue and
/// green lines from each landmark to both neighbours
pub fn draw_landmarks_and_connections(
    image: &RgbImage,
    landmarks: &[PixelPoint],
    neighbors: &[ContourNeighbors],
) -> RgbImage {
    let mut canvas = image.clone();

    for &landmark in landmarks {
        draw_marker(&mut canvas, landmark, OVERLAY_RADIUS, LANDMARK_COLOR);
    }

    for (&landmark, pair) in landmarks.iter().zip(neighbors) {
        draw_marker(&mut canvas, pair.left, OVERLAY_RADIUS, NEIGHBOR_COLOR);
        draw_marker(&mut canvas, pair.right, OVERLAY_RADIUS, NEIGHBOR_COLOR);
        draw_line_segment_mut(&mut canvas, as_f32(landmark), as_f32(pair.left), CONNECTION_COLOR);
        draw_line_segment_mut(&mut canvas, as_f32(landmark), as_f32(pair.right), CONNECTION_COLOR);
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::point::Point;

    #[test]
    fn test_marker_is_clipped_at_border() {
        let mut canvas = RgbImage::new(10, 10);
        draw_marker(&mut canvas, Point::new(0, 0), 3, Rgb([255, 0, 0]));
        draw_marker(&mut canvas, Point::new(-20, 40), 3, Rgb([255, 0, 0]));

        assert_eq!(*canvas.get_pixel(0, 0), Rgb([255, 0, 0]));
        assert_eq!(*canvas.get_pixel(9, 9), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_overlay_colors() {
        let image = RgbImage::new(100, 100);
        let landmarks = [Point::new(50, 50)];
        let neighbors = [ContourNeighbors { left: Point::new(10, 50), right: Point::new(90, 50) }];

        let overlay = draw_landmarks_and_connections(&image, &landmarks, &neighbors);

        // connection lines are drawn last and cross the landmark centre
        assert_eq!(*overlay.get_pixel(50, 52), LANDMARK_COLOR);
        assert_eq!(*overlay.get_pixel(50, 50), CONNECTION_COLOR);
        assert_eq!(*overlay.get_pixel(10, 50), CONNECTION_COLOR);
        assert_eq!(*overlay.get_pixel(10, 52), NEIGHBOR_COLOR);
        assert_eq!(*overlay.get_pixel(30, 50), CONNECTION_COLOR);
        assert_eq!(*image.get_pixel(50, 50), Rgb([0, 0, 0]));
    }
}
