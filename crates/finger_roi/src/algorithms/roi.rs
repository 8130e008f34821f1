use geo::MinimumRotatedRect;
use geo_types::{Coord, MultiPoint, Point as GeoPoint};
use image::{imageops, Rgb, RgbImage};
use imageproc::geometric_transformations::{warp, Interpolation};
use imageproc::point::Point;
use tracing::debug;
use crate::{
    error::{FingerRoiError, Result},
    types::{AffineMatrix, PixelPoint, RotatedRect},
};

/// Default fraction added to each side of a finger rectangle
pub const DEFAULT_ROI_MARGIN: f64 = 0.15;

/// Minimum-area rotated rectangle around `points`, in portrait orientation.
///
/// Before the portrait swap the angle is brought into (0, 90], so the final
/// angle lies in (-90, 90].
pub fn min_area_rect(points: &[PixelPoint]) -> Result<RotatedRect> {
    let first = *points.first().ok_or(FingerRoiError::EmptyPointSet)?;

    if points.iter().all(|p| *p == first) {
        return Ok(RotatedRect {
            center: Coord { x: first.x as f64, y: first.y as f64 },
            width: 0.0,
            height: 0.0,
            angle: 0.0,
        });
    }

    let cloud: MultiPoint<f64> = points
        .iter()
        .map(|p| GeoPoint::new(p.x as f64, p.y as f64))
        .collect();
    let polygon = cloud.minimum_rotated_rect().ok_or_else(|| {
        FingerRoiError::GeometricComputation("minimum rotated rectangle is undefined".to_string())
    })?;

    let corners: Vec<Coord<f64>> = polygon.exterior().coords().copied().collect();
    if corners.len() < 4 {
        return Err(FingerRoiError::GeometricComputation(format!(
            "rotated rectangle has {} corners",
            corners.len()
        )));
    }
    let (c0, c1, c2) = (corners[0], corners[1], corners[2]);

    let width = (c1.x - c0.x).hypot(c1.y - c0.y);
    let height = (c2.x - c1.x).hypot(c2.y - c1.y);
    let angle = (c1.y - c0.y).atan2(c1.x - c0.x).to_degrees();
    let center = Coord { x: (c0.x + c2.x) / 2.0, y: (c0.y + c2.y) / 2.0 };

    Ok(canonical_rect(center, width, height, angle).to_portrait())
}

/// Express the same rectangle with its angle in (0, 90]
fn canonical_rect(center: Coord<f64>, width: f64, height: f64, angle: f64) -> RotatedRect {
    let mut angle = angle.rem_euclid(180.0);
    let (mut width, mut height) = (width, height);

    if angle > 90.0 {
        angle -= 90.0;
        std::mem::swap(&mut width, &mut height);
    }
    if angle < 1e-9 {
        angle = 90.0;
        std::mem::swap(&mut width, &mut height);
    }

    RotatedRect { center, width, height, angle }
}

fn crop_offset(center: Coord<f64>, width: f64, height: f64) -> (i32, i32) {
    (
        (center.x - (width / 2.0).floor()) as i32,
        (center.y - (height / 2.0).floor()) as i32,
    )
}

/// Shift a point from the warped frame into the frame of a crop of size
/// `roi_size` centred on `roi_center`
pub fn adjust_for_roi_crop(point: PixelPoint, roi_center: Coord<f64>, roi_size: (f64, f64)) -> PixelPoint {
    let (x_offset, y_offset) = crop_offset(roi_center, roi_size.0, roi_size.1);
    Point::new(point.x - x_offset, point.y - y_offset)
}

/// Axis-aligned crop window in the warped frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropWindow {
    pub center: Coord<f64>,
    pub width: f64,
    pub height: f64,
}

impl CropWindow {
    pub fn origin(&self) -> (i32, i32) {
        crop_offset(self.center, self.width, self.height)
    }

    /// Top-left corner of the crop actually taken, after clamping to the image
    pub fn clamped_origin(&self) -> (i32, i32) {
        let (x, y) = self.origin();
        (x.max(0), y.max(0))
    }

    /// Cut the window out of `image`; parts outside the image are dropped
    pub fn crop(&self, image: &RgbImage) -> RgbImage {
        let (x, y) = self.origin();
        let (x, y) = (x as i64, y as i64);
        let (w, h) = (self.width as i64, self.height as i64);

        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(image.width() as i64);
        let y1 = (y + h).min(image.height() as i64);

        if x1 <= x0 || y1 <= y0 {
            return RgbImage::new(0, 0);
        }

        imageops::crop_imm(image, x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32).to_image()
    }
}

/// A cropped, rotation-normalised region together with the exact transform
/// that produced it. Points are mapped into the crop through [`RoiResult::to_roi_local`],
/// which always uses this ROI's own matrix and window.
#[derive(Debug, Clone)]
pub struct RoiResult {
    image: RgbImage,
    matrix: AffineMatrix,
    rect: RotatedRect,
    window: CropWindow,
}

impl RoiResult {
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbImage {
        &mut self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn matrix(&self) -> &AffineMatrix {
        &self.matrix
    }

    /// Portrait rectangle fitted to the input points, before the margin
    pub fn rect(&self) -> &RotatedRect {
        &self.rect
    }

    pub fn window(&self) -> &CropWindow {
        &self.window
    }

    /// Zero-area crop
    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    /// Zero-area or entirely black crop
    pub fn is_blank(&self) -> bool {
        self.is_empty() || self.image.pixels().all(|p| p.0 == [0, 0, 0])
    }

    /// Map a point from the source frame into this ROI's pixel frame
    pub fn to_roi_local(&self, point: PixelPoint) -> PixelPoint {
        let rotated = self.matrix.transform_point(point);
        let local = adjust_for_roi_crop(rotated, self.window.center, (self.window.width, self.window.height));
        // windows hanging over the top or left edge start at 0
        let (x, y) = self.window.origin();
        let (cx, cy) = self.window.clamped_origin();
        Point::new(local.x - (cx - x), local.y - (cy - y))
    }
}

/// Rotated ROI extraction: fit a portrait minimum-area rectangle to `points`,
/// widen it by `margin`, rotate the whole image about the rectangle centre so
/// the rectangle is axis-aligned and crop it out.
pub fn extract_rotated_roi(image: &RgbImage, points: &[PixelPoint], margin: f64) -> Result<RoiResult> {
    let rect = min_area_rect(points)?;
    let expanded = rect.expanded(margin);
    let window = CropWindow {
        center: expanded.center,
        width: expanded.width,
        height: expanded.height,
    };

    let matrix = AffineMatrix::rotation(rect.center, rect.angle, 1.0);
    let projection = matrix.to_projection().ok_or_else(|| {
        FingerRoiError::GeometricComputation("rotation matrix is not invertible".to_string())
    })?;

    let warped = warp(image, &projection, Interpolation::Bilinear, Rgb([0, 0, 0]));
    let roi = window.crop(&warped);

    debug!(
        center_x = rect.center.x,
        center_y = rect.center.y,
        width = rect.width,
        height = rect.height,
        angle = rect.angle,
        roi_width = roi.width(),
        roi_height = roi.height(),
        "extracted rotated ROI"
    );

    Ok(RoiResult { image: roi, matrix, rect, window })
}
