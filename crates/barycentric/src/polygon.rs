//! Regular convex polygon embedding.
//!
//! Corners sit on the circle of radius 0.5 around (0.5, 0.5), starting at the
//! top (angle π/2) and proceeding counter-clockwise. Corner `i` is barycentric
//! axis `i`, so the polygon is fully determined by its corner count `d`.

use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::sync::{Arc, RwLock};

use crate::error::{BaryError, Result};
use crate::types::{GeomCfg, Point2, Segment};

/// Centre of the embedding.
#[inline]
pub fn center() -> Point2 {
    Point2::new(0.5, 0.5)
}

/// Circumradius of every polygon.
pub const RADIUS: f64 = 0.5;

/// Cartesian corners of the regular `d`-gon, counter-clockwise from the top.
pub fn corners(d: usize) -> Result<Vec<Point2>> {
    check_corner_count(d)?;
    Ok((0..d)
        .map(|i| {
            let angle = (i as f64 / d as f64) * TAU + FRAC_PI_2;
            center() + Point2::new(angle.cos(), angle.sin()) * RADIUS
        })
        .collect())
}

pub(crate) fn check_corner_count(d: usize) -> Result<()> {
    if d < 2 {
        return Err(BaryError::invalid(format!(
            "corner count {d} < 2 has no polygon"
        )));
    }
    Ok(())
}

/// Index of the corner preceding `i` (edge `i` joins corner `i` to it).
#[inline]
pub fn prev_corner(i: usize, d: usize) -> usize {
    (i + d - 1) % d
}

/// Regular polygon with its corners materialized.
///
/// Corners are shared, so polygons handed out by a [`CornerCache`] do not
/// copy them.
#[derive(Clone, Debug)]
pub struct Polygon {
    corners: Arc<[Point2]>,
}

impl Polygon {
    pub fn new(d: usize) -> Result<Self> {
        Ok(Self {
            corners: corners(d)?.into(),
        })
    }

    #[inline]
    pub fn d(&self) -> usize {
        self.corners.len()
    }

    #[inline]
    pub fn corners(&self) -> &[Point2] {
        &self.corners
    }

    /// Edges as `(i1, i2)` with `i2` the previous corner, for `i1 = 0..d`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let d = self.d();
        (0..d).map(move |i1| (i1, prev_corner(i1, d)))
    }

    /// Segment of edge `i1`.
    pub fn segment(&self, i1: usize) -> Segment {
        let i2 = prev_corner(i1, self.d());
        Segment::new(self.corners[i1], self.corners[i2])
    }

    /// Membership using the configured slack.
    #[inline]
    pub fn contains(&self, p: Point2, cfg: GeomCfg) -> bool {
        self.contains_eps(p, cfg.eps_contains)
    }

    /// Membership with slack `eps` (positive enlarges the polygon).
    ///
    /// Corners are counter-clockwise, so interior points lie left of every
    /// directed edge `c_i -> c_{i+1}`. For `d == 2` the polygon is the
    /// vertical diameter; membership means lying on it within `eps`.
    pub fn contains_eps(&self, p: Point2, eps: f64) -> bool {
        let d = self.d();
        if d == 2 {
            let s = Segment::new(self.corners[0], self.corners[1]);
            let ab = s.b - s.a;
            let t = (p - s.a).dot(&ab) / ab.norm_squared();
            let closest = s.a + ab * t.clamp(0.0, 1.0);
            return (p - closest).norm() <= eps;
        }
        (0..d).all(|i| {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % d];
            let edge = b - a;
            let cross = edge.x * (p.y - a.y) - edge.y * (p.x - a.x);
            cross >= -eps * edge.norm()
        })
    }
}

/// Corner positions memoized per corner count.
///
/// Entries are computed once and never mutated afterwards; lookups take the
/// read lock only.
#[derive(Debug, Default)]
pub struct CornerCache {
    inner: RwLock<HashMap<usize, Arc<[Point2]>>>,
}

impl CornerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, d: usize) -> Result<Arc<[Point2]>> {
        if let Some(hit) = self.read().get(&d) {
            return Ok(Arc::clone(hit));
        }
        let fresh: Arc<[Point2]> = corners(d)?.into();
        let mut map = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(Arc::clone(map.entry(d).or_insert(fresh)))
    }

    /// Polygon backed by the cached corners for `d`.
    pub fn polygon(&self, d: usize) -> Result<Polygon> {
        Ok(Polygon {
            corners: self.get(d)?,
        })
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<usize, Arc<[Point2]>>> {
        // Entries are immutable once inserted, so a poisoned lock still holds valid data.
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_corners() {
        let c = corners(3).unwrap();
        assert_eq!(c.len(), 3);
        assert!((c[0] - Point2::new(0.5, 1.0)).norm() < 1e-12);
        // 210° and 330°
        let s3 = 3f64.sqrt() / 4.0;
        assert!((c[1] - Point2::new(0.5 - s3, 0.25)).norm() < 1e-12);
        assert!((c[2] - Point2::new(0.5 + s3, 0.25)).norm() < 1e-12);
    }

    #[test]
    fn corners_on_circle_ccw() {
        for d in 2..=12 {
            let c = corners(d).unwrap();
            assert_eq!(c.len(), d);
            assert!((c[0] - Point2::new(0.5, 1.0)).norm() < 1e-12);
            for p in &c {
                assert!(((p - center()).norm() - RADIUS).abs() < 1e-12);
            }
            if d >= 3 {
                // second corner is to the left of the first (counter-clockwise from top)
                assert!(c[1].x < c[0].x);
            }
        }
    }

    #[test]
    fn rejects_small_corner_counts() {
        assert!(matches!(corners(0), Err(BaryError::InvalidArgument { .. })));
        assert!(matches!(corners(1), Err(BaryError::InvalidArgument { .. })));
        assert!(Polygon::new(1).is_err());
    }

    #[test]
    fn edges_roll_by_one() {
        let p = Polygon::new(4).unwrap();
        let e: Vec<_> = p.edges().collect();
        assert_eq!(e, vec![(0, 3), (1, 0), (2, 1), (3, 2)]);
        let s = p.segment(0);
        assert_eq!(s.a, p.corners()[0]);
        assert_eq!(s.b, p.corners()[3]);
    }

    #[test]
    fn contains_centre_not_outside() {
        for d in 2..=8 {
            let p = Polygon::new(d).unwrap();
            assert!(p.contains_eps(center(), 1e-9));
            assert!(!p.contains_eps(Point2::new(1.5, 0.5), 1e-9));
            for &c in p.corners() {
                assert!(p.contains_eps(c, 1e-9));
            }
        }
    }

    #[test]
    fn cache_returns_same_corners() {
        let cache = CornerCache::new();
        assert!(cache.is_empty());
        let a = cache.get(5).unwrap();
        let b = cache.get(5).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(&a[..], &corners(5).unwrap()[..]);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(1).is_err());
        assert_eq!(cache.len(), 1);
        let poly = cache.polygon(5).unwrap();
        assert_eq!(poly.d(), 5);
        assert_eq!(poly.corners(), &a[..]);
        assert_eq!(cache.len(), 1);
        assert!(cache.polygon(0).is_err());
    }

    #[test]
    fn cache_shared_across_threads() {
        let cache = Arc::new(CornerCache::new());
        let handles: Vec<_> = (0..4)
            .map(|k| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get(3 + k % 2).unwrap().len())
            })
            .collect();
        for h in handles {
            let n = h.join().unwrap();
            assert!(n == 3 || n == 4);
        }
        assert_eq!(cache.len(), 2);
    }
}
