//! Euclidean projection of a point onto the line through two points.
//!
//! `project_point_line` returns the projection onto the infinite line and does
//! not clamp to the segment. Edge weighting downstream measures
//! corner-to-projection distances, so it tolerates projections outside the
//! edge. Use `project_point_segment` for the bounded variant.

use crate::error::{BaryError, Result};
use crate::types::{Point2, Segment};

/// Line parameter `t` of the projection of `p`: `a + t (b - a)`.
pub fn line_parameter(p: Point2, a: Point2, b: Point2) -> Result<f64> {
    let ab = b - a;
    let denom = ab.dot(&ab);
    if denom == 0.0 {
        return Err(BaryError::DegenerateSegment);
    }
    Ok((p - a).dot(&ab) / denom)
}

/// Orthogonal projection of `p` onto the line through `a` and `b`.
pub fn project_point_line(p: Point2, a: Point2, b: Point2) -> Result<Point2> {
    let t = line_parameter(p, a, b)?;
    Ok(a + (b - a) * t)
}

/// Closest point to `p` on the closed segment `[a, b]` (`t` clamped to [0,1]).
pub fn project_point_segment(p: Point2, seg: Segment) -> Result<Point2> {
    let t = line_parameter(p, seg.a, seg.b)?.clamp(0.0, 1.0);
    Ok(seg.a + (seg.b - seg.a) * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_onto_x_axis() {
        let p = project_point_line(
            Point2::new(0.5, 0.5),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
        )
        .unwrap();
        assert!((p - Point2::new(0.5, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn coincident_endpoints_are_degenerate() {
        let a = Point2::new(0.3, 0.7);
        assert_eq!(
            project_point_line(Point2::new(0.0, 0.0), a, a),
            Err(BaryError::DegenerateSegment)
        );
        assert_eq!(
            project_point_segment(Point2::new(0.0, 0.0), Segment::new(a, a)),
            Err(BaryError::DegenerateSegment)
        );
    }

    #[test]
    fn line_projection_is_not_clamped() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let p = Point2::new(2.0, 1.0);
        assert!((line_parameter(p, a, b).unwrap() - 2.0).abs() < 1e-12);
        let on_line = project_point_line(p, a, b).unwrap();
        assert!((on_line - Point2::new(2.0, 0.0)).norm() < 1e-12);
        let on_seg = project_point_segment(p, Segment::new(a, b)).unwrap();
        assert!((on_seg - b).norm() < 1e-12);
    }

    #[test]
    fn residual_is_orthogonal_to_line() {
        let a = Point2::new(0.1, 0.2);
        let b = Point2::new(0.9, 0.6);
        let p = Point2::new(0.4, 0.8);
        let q = project_point_line(p, a, b).unwrap();
        assert!((p - q).dot(&(b - a)).abs() < 1e-12);
    }
}
