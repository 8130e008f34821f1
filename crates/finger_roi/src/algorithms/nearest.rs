use crate::{
    error::{FingerRoiError, Result},
    types::{Contour, ContourNeighbors, PixelPoint},
};

fn distance_sq(a: PixelPoint, b: PixelPoint) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}

/// Closest candidate to `target`; the first one wins ties
fn nearest<'a, I>(target: PixelPoint, candidates: I) -> Option<PixelPoint>
where
    I: IntoIterator<Item = &'a PixelPoint>,
{
    let mut best: Option<(i64, PixelPoint)> = None;
    for &candidate in candidates {
        let d = distance_sq(target, candidate);
        if best.is_none_or(|(best_d, _)| d < best_d) {
            best = Some((d, candidate));
        }
    }
    best.map(|(_, p)| p)
}

/// For every landmark, the closest contour point on its left (x <= landmark.x)
/// and on its right (x > landmark.x).
///
/// Landmarks listed in `tips` only consider contour points at or below them
/// (y >= landmark.y). When a side has no candidates the whole contour is searched
/// for that side instead. The result is index-aligned with `landmarks`.
pub fn closest_contour_points(
    landmarks: &[PixelPoint],
    contour: &Contour,
    tips: &[usize],
) -> Result<Vec<ContourNeighbors>> {
    if contour.is_empty() {
        return Err(FingerRoiError::EmptyContour);
    }
    let points = &contour.points;

    landmarks
        .iter()
        .enumerate()
        .map(|(index, &landmark)| {
            let below_only = tips.contains(&index);
            let in_band = |p: &&PixelPoint| !below_only || p.y >= landmark.y;

            let left = nearest(landmark, points.iter().filter(|p| p.x <= landmark.x).filter(in_band))
                .or_else(|| nearest(landmark, points))
                .ok_or(FingerRoiError::EmptyContour)?;
            let right = nearest(landmark, points.iter().filter(|p| p.x > landmark.x).filter(in_band))
                .or_else(|| nearest(landmark, points))
                .ok_or(FingerRoiError::EmptyContour)?;

            Ok(ContourNeighbors { left, right })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::point::Point;

    /// Boundary of the axis-aligned square [x0, x1] x [y0, y1], one point per pixel
    fn square(x0: i32, y0: i32, x1: i32, y1: i32) -> Contour {
        let mut points = Vec::new();
        for x in x0..x1 {
            points.push(Point::new(x, y0));
        }
        for y in y0..y1 {
            points.push(Point::new(x1, y));
        }
        for x in (x0 + 1..=x1).rev() {
            points.push(Point::new(x, y1));
        }
        for y in (y0 + 1..=y1).rev() {
            points.push(Point::new(x0, y));
        }
        Contour::new(points)
    }

    #[test]
    fn test_landmark_on_contour() {
        let contour = square(10, 10, 50, 50);
        let on_edge = Point::new(30, 10);

        let result = closest_contour_points(&[on_edge], &contour, &[]).unwrap();
        assert_eq!(result[0].left, on_edge);
        assert_eq!(distance_sq(result[0].right, on_edge), 1);
    }

    #[test]
    fn test_joint_landmark_picks_both_walls() {
        let contour = square(10, 10, 50, 50);
        let inside = Point::new(20, 30);

        let result = closest_contour_points(&[inside], &contour, &[]).unwrap();
        assert_eq!(result[0].left, Point::new(10, 30));
        // right side: the top wall just past x=20 beats the right wall at distance 30
        assert_eq!(result[0].right, Point::new(21, 10));
    }

    #[test]
    fn test_extreme_left_falls_back_to_whole_contour() {
        let contour = square(10, 10, 50, 50);
        let outside = Point::new(2, 25);

        let result = closest_contour_points(&[outside], &contour, &[]).unwrap();
        let global = nearest(outside, &contour.points).unwrap();
        assert_eq!(result[0].left, global);
        assert_eq!(result[0].left, Point::new(10, 25));
    }

    #[test]
    fn test_tip_only_searches_below() {
        let contour = square(10, 10, 50, 50);
        // Near the top wall: a joint would snap to it, a tip must not
        let landmark = Point::new(30, 12);

        let joint = closest_contour_points(&[landmark], &contour, &[]).unwrap();
        assert_eq!(joint[0].left, Point::new(30, 10));

        let tip = closest_contour_points(&[landmark], &contour, &[0]).unwrap();
        assert!(tip[0].left.y >= 12);
        assert!(tip[0].right.y >= 12);
        assert_eq!(tip[0].left, Point::new(10, 12));
        assert_eq!(tip[0].right, Point::new(50, 12));
    }

    #[test]
    fn test_tip_below_contour_falls_back() {
        let contour = square(10, 10, 50, 50);
        let landmark = Point::new(30, 70);

        let result = closest_contour_points(&[landmark], &contour, &[0]).unwrap();
        assert_eq!(result[0].left, Point::new(30, 50));
        assert_eq!(result[0].right, Point::new(30, 50));
    }

    #[test]
    fn test_ties_resolve_to_first_occurrence() {
        let contour = Contour::new(vec![Point::new(0, 5), Point::new(0, -5), Point::new(10, 0)]);
        let result = closest_contour_points(&[Point::new(5, 0)], &contour, &[]).unwrap();
        assert_eq!(result[0].left, Point::new(0, 5));
        assert_eq!(result[0].right, Point::new(10, 0));
    }

    #[test]
    fn test_output_is_index_aligned() {
        let contour = square(0, 0, 100, 100);
        let landmarks: Vec<PixelPoint> = (1..=21).map(|i| Point::new(i * 4, 50)).collect();

        let result = closest_contour_points(&landmarks, &contour, &[4, 8, 12, 16, 20]).unwrap();
        assert_eq!(result.len(), 21);
        for (landmark, neighbors) in landmarks.iter().zip(&result) {
            assert!(neighbors.left.x <= landmark.x || neighbors.left == nearest(*landmark, &contour.points).unwrap());
            assert!(neighbors.right.x > landmark.x);
        }
    }

    #[test]
    fn test_empty_contour_fails() {
        let err = closest_contour_points(&[Point::new(1, 1)], &Contour::new(vec![]), &[]).unwrap_err();
        assert!(matches!(err, FingerRoiError::EmptyContour));
    }
}
