use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::{
    error::{FingerRoiError, Result},
    types::{Contour, PixelPoint},
};

/// How traced boundary points are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChainApproximation {
    /// Every boundary pixel
    None,
    /// Horizontal, vertical and diagonal runs reduced to their end points
    #[default]
    Simple,
}

impl ChainApproximation {
    pub fn apply(self, contour: Contour) -> Contour {
        match self {
            ChainApproximation::None => contour,
            ChainApproximation::Simple => compress_runs(contour),
        }
    }
}

fn step(from: PixelPoint, to: PixelPoint) -> (i32, i32) {
    ((to.x - from.x).signum(), (to.y - from.y).signum())
}

/// Drop points sitting in the middle of a straight run of the closed chain
fn compress_runs(contour: Contour) -> Contour {
    let n = contour.len();
    if n < 3 {
        return contour;
    }

    let points = &contour.points;
    let kept: Vec<PixelPoint> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect();

    if kept.is_empty() {
        contour
    } else {
        Contour::new(kept)
    }
}

/// Imageproc-based extractor returning the largest outer contour of a mask
#[derive(Debug, Clone, Default)]
pub struct ImageprocContourExtractor {
    pub approximation: ChainApproximation,
}

impl ImageprocContourExtractor {
    pub fn new(approximation: ChainApproximation) -> Self {
        Self { approximation }
    }

    /// Outer contours of every foreground region, in discovery order
    pub fn external_contours(&self, mask: &GrayImage) -> Vec<Contour> {
        find_contours::<i32>(mask)
            .into_iter()
            .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
            .map(|c| self.approximation.apply(Contour::new(c.points)))
            .collect()
    }

    /// The external contour enclosing the largest area; the first one wins ties.
    pub fn extract(&self, mask: &GrayImage) -> Result<Contour> {
        let mut largest: Option<(f64, Contour)> = None;

        for contour in self.external_contours(mask) {
            let area = contour.area();
            match &largest {
                Some((best, _)) if area <= *best => {}
                _ => largest = Some((area, contour)),
            }
        }

        let (area, contour) = largest.ok_or(FingerRoiError::NoForeground)?;
        debug!(points = contour.len(), area, "selected largest contour");
        Ok(contour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use imageproc::point::Point;

    fn fill(img: &mut GrayImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) {
        for y in ys {
            for x in xs.clone() {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
    }

    #[test]
    fn test_rectangle_contour_area() {
        let mut mask = GrayImage::new(100, 100);
        fill(&mut mask, 20..80, 20..80);

        let contour = ImageprocContourExtractor::default().extract(&mask).expect("Should find contour");
        let area = contour.area();
        // Boundary pixel centres enclose 59x59; allow one pixel ring of slack
        assert!((area - 3600.0).abs() <= 240.0, "area {area}");
    }

    #[test]
    fn test_simple_approximation_keeps_corners() {
        let mut mask = GrayImage::new(100, 100);
        fill(&mut mask, 20..80, 30..60);

        let contour = ImageprocContourExtractor::new(ChainApproximation::Simple)
            .extract(&mask)
            .unwrap();
        assert_eq!(contour.len(), 4);
        for corner in [Point::new(20, 30), Point::new(79, 30), Point::new(79, 59), Point::new(20, 59)] {
            assert!(contour.points.contains(&corner), "missing corner {corner:?}");
        }
    }

    #[test]
    fn test_no_approximation_keeps_every_boundary_pixel() {
        let mut mask = GrayImage::new(50, 50);
        fill(&mut mask, 10..20, 10..20);

        let contour = ImageprocContourExtractor::new(ChainApproximation::None)
            .extract(&mask)
            .unwrap();
        assert_eq!(contour.len(), 36);
    }

    #[test]
    fn test_largest_region_selected() {
        let mut mask = GrayImage::new(200, 100);
        fill(&mut mask, 5..25, 5..25);
        fill(&mut mask, 100..190, 10..90);

        let contour = ImageprocContourExtractor::default().extract(&mask).unwrap();
        assert!(contour.points.iter().all(|p| p.x >= 100));
    }

    #[test]
    fn test_holes_are_ignored() {
        let mut mask = GrayImage::new(100, 100);
        fill(&mut mask, 10..90, 10..90);
        for y in 30..70 {
            for x in 30..70 {
                mask.put_pixel(x, y, Luma([0u8]));
            }
        }

        let extractor = ImageprocContourExtractor::default();
        assert_eq!(extractor.external_contours(&mask).len(), 1);
        let contour = extractor.extract(&mask).unwrap();
        assert!(contour.points.iter().all(|p| p.x == 10 || p.x == 89 || p.y == 10 || p.y == 89));
    }

    #[test]
    fn test_empty_mask_has_no_foreground() {
        let mask = GrayImage::new(64, 64);
        assert!(matches!(
            ImageprocContourExtractor::default().extract(&mask),
            Err(FingerRoiError::NoForeground)
        ));
    }
}
