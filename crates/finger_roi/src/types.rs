use geo_types::{Coord, LineString, Polygon};
use imageproc::geometric_transformations::Projection;
use imageproc::point::Point;

/// Integer pixel coordinate in some image's frame
pub type PixelPoint = Point<i32>;

/// Outer boundary of a segmented foreground region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<PixelPoint>,
}

impl Contour {
    pub fn new(points: Vec<PixelPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Convert to a geo-types Polygon for geometric operations
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = self
            .points
            .iter()
            .map(|p| Coord { x: p.x as f64, y: p.y as f64 })
            .collect();

        Polygon::new(LineString::new(coords), vec![])
    }

    /// Enclosed area (shoelace), zero for degenerate contours
    pub fn area(&self) -> f64 {
        use geo::Area;
        if self.points.len() < 3 {
            return 0.0;
        }
        self.to_geo_polygon().unsigned_area()
    }
}

/// Closest contour point on each side of a landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContourNeighbors {
    pub left: PixelPoint,
    pub right: PixelPoint,
}

/// Rotated rectangle: centre, size and rotation in degrees.
///
/// `angle` is the rotation that, applied about `center` with
/// [`AffineMatrix::rotation`], makes the `width` side horizontal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedRect {
    pub center: Coord<f64>,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

impl RotatedRect {
    /// Swap to portrait orientation (width <= height), adjusting the angle by -90°
    pub fn to_portrait(self) -> Self {
        if self.width > self.height {
            Self {
                center: self.center,
                width: self.height,
                height: self.width,
                angle: self.angle - 90.0,
            }
        } else {
            self
        }
    }

    /// Grow both sides by `margin` (0.15 = 15%), keeping the centre and angle
    pub fn expanded(self, margin: f64) -> Self {
        Self {
            width: self.width + self.width * margin,
            height: self.height + self.height * margin,
            ..self
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// 2x3 affine matrix mapping points from the source frame into a warped frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMatrix(pub [[f64; 3]; 2]);

impl AffineMatrix {
    /// Rotation about `center` by `angle_degrees` (positive is counter-clockwise on screen)
    /// with uniform `scale`, laid out like OpenCV's `getRotationMatrix2D`.
    pub fn rotation(center: Coord<f64>, angle_degrees: f64, scale: f64) -> Self {
        let theta = angle_degrees.to_radians();
        let alpha = scale * theta.cos();
        let beta = scale * theta.sin();

        Self([
            [alpha, beta, (1.0 - alpha) * center.x - beta * center.y],
            [-beta, alpha, beta * center.x + (1.0 - alpha) * center.y],
        ])
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [r0, r1] = self.0;
        (
            r0[0] * x + r0[1] * y + r0[2],
            r1[0] * x + r1[1] * y + r1[2],
        )
    }

    /// Map a point through the matrix in homogeneous form, truncating to integers
    pub fn transform_point(&self, point: PixelPoint) -> PixelPoint {
        let (x, y) = self.apply(point.x as f64, point.y as f64);
        Point::new(x as i32, y as i32)
    }

    /// Projection usable by imageproc's warp, `None` when the matrix is singular
    pub fn to_projection(&self) -> Option<Projection> {
        let [r0, r1] = self.0;
        Projection::from_matrix([
            r0[0] as f32, r0[1] as f32, r0[2] as f32,
            r1[0] as f32, r1[1] as f32, r1[2] as f32,
            0.0, 0.0, 1.0,
        ])
    }
}
