//! Value types: barycentric coordinates, Cartesian points, segments, tolerances.
//!
//! - `Bary`: weights over the corners of a `d`-gon (not necessarily normalized).
//! - `Point2`: a Cartesian point in the unit-square embedding.
//! - `Segment`: a pair of endpoints, used transiently by projections.
//! - `GeomCfg`: centralizes the epsilons used by predicates.

use nalgebra::{DVector, Vector2};

use crate::error::{BaryError, Result};

/// Cartesian point (x, y).
pub type Point2 = Vector2<f64>;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Slack for point-in-polygon checks.
    pub eps_contains: f64,
    /// Absolute tolerance when comparing normalized weights.
    pub eps_weight: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_contains: 1e-9,
            eps_weight: 1e-12,
        }
    }
}

/// Barycentric coordinate: one weight per polygon corner.
///
/// Invariants:
/// - At least one weight (`dim() >= 1`); geometric consumers additionally
///   require `dim() >= 2`.
/// - Weights are conceptually normalized; consumers divide by `sum()` before
///   geometric use and reject a zero or non-finite sum.
#[derive(Clone, Debug, PartialEq)]
pub struct Bary {
    w: DVector<f64>,
}

impl Bary {
    /// Wrap raw weights. Fails on an empty weight list.
    pub fn new(weights: impl Into<Vec<f64>>) -> Result<Self> {
        let weights = weights.into();
        if weights.is_empty() {
            return Err(BaryError::invalid("barycentric coordinate has no weights"));
        }
        Ok(Self {
            w: DVector::from_vec(weights),
        })
    }

    /// Unit vector `e_i` of dimension `d` (the coordinate of corner `i`).
    pub fn unit(d: usize, i: usize) -> Result<Self> {
        if i >= d {
            return Err(BaryError::invalid(format!("axis {i} out of range for d={d}")));
        }
        let mut w = DVector::zeros(d);
        w[i] = 1.0;
        Ok(Self { w })
    }

    /// Centroid: every weight equal to `1/d`.
    pub fn centroid(d: usize) -> Result<Self> {
        if d == 0 {
            return Err(BaryError::invalid("centroid of zero corners"));
        }
        Ok(Self {
            w: DVector::from_element(d, 1.0 / d as f64),
        })
    }

    pub(crate) fn from_vector(w: DVector<f64>) -> Self {
        debug_assert!(!w.is_empty());
        Self { w }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.w.len()
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        self.w.as_slice()
    }

    #[inline]
    pub fn as_vector(&self) -> &DVector<f64> {
        &self.w
    }

    #[inline]
    pub fn sum(&self) -> f64 {
        self.w.sum()
    }

    /// Weights divided by their sum. Zero or non-finite sums are rejected.
    pub fn normalized(&self) -> Result<Bary> {
        let s = self.sum();
        if !s.is_finite() {
            return Err(BaryError::invalid(format!(
                "weights {:?} have non-finite sum",
                self.weights()
            )));
        }
        if s == 0.0 {
            return Err(BaryError::invalid(format!(
                "weights {:?} sum to zero and cannot be normalized",
                self.weights()
            )));
        }
        Ok(Self { w: &self.w / s })
    }

    /// Normalization check with the configured weight tolerance.
    #[inline]
    pub fn is_normalized(&self, cfg: GeomCfg) -> bool {
        self.is_normalized_eps(cfg.eps_weight)
    }

    /// True if the weights are non-negative and sum to 1 within `eps`.
    pub fn is_normalized_eps(&self, eps: f64) -> bool {
        self.w.iter().all(|&x| x >= -eps) && (self.sum() - 1.0).abs() <= eps
    }
}

impl TryFrom<Vec<f64>> for Bary {
    type Error = BaryError;
    fn try_from(weights: Vec<f64>) -> Result<Self> {
        Bary::new(weights)
    }
}

impl TryFrom<&[f64]> for Bary {
    type Error = BaryError;
    fn try_from(weights: &[f64]) -> Result<Self> {
        Bary::new(weights.to_vec())
    }
}

/// Line segment between two Cartesian points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Point2,
    pub b: Point2,
}

impl Segment {
    #[inline]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }
    #[inline]
    pub fn length(&self) -> f64 {
        (self.b - self.a).norm()
    }
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        (self.b - self.a).norm_squared() == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        assert!(Bary::new(Vec::new()).is_err());
        assert_eq!(Bary::unit(3, 1).unwrap().weights(), &[0.0, 1.0, 0.0]);
        assert!(Bary::unit(3, 3).is_err());
        assert_eq!(Bary::centroid(4).unwrap().weights(), &[0.25; 4]);
        assert!(Bary::centroid(0).is_err());
        let b: Bary = vec![1.0, 3.0].try_into().unwrap();
        assert_eq!(b.dim(), 2);
    }

    #[test]
    fn normalization() {
        let b = Bary::new(vec![1.0, 3.0]).unwrap();
        let n = b.normalized().unwrap();
        assert_eq!(n.weights(), &[0.25, 0.75]);
        assert!(n.is_normalized(GeomCfg::default()));
        assert!(!b.is_normalized(GeomCfg::default()));
        assert!(matches!(
            Bary::new(vec![0.0, 0.0]).unwrap().normalized(),
            Err(BaryError::InvalidArgument { .. })
        ));
        assert!(Bary::new(vec![f64::INFINITY, 1.0]).unwrap().normalized().is_err());
    }

    #[test]
    fn segment_basics() {
        let s = Segment::new(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert_eq!(s.length(), 5.0);
        assert!(!s.is_degenerate());
        assert!(Segment::new(s.a, s.a).is_degenerate());
    }
}
