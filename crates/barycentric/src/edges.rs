//! Closest point on every polygon edge, expressed in barycentric form.
//!
//! The point is mapped to Cartesian space, projected onto the line of each
//! edge `(i1, i2)` with `i2 = i1 - 1 (mod d)`, and the two corner distances
//! of the projection are turned back into weights: axis `i1` receives the
//! distance from `i2` and axis `i2` the distance from `i1`, so the nearer
//! corner gets the larger share.
//!
//! This far-distance weighting is the established behaviour of the edge map;
//! it is not a canonical barycentric edge projection.

use nalgebra::DMatrix;

use crate::convert::{shared_dim, to_cartesian_with};
use crate::error::{BaryError, Result};
use crate::polygon::{CornerCache, Polygon};
use crate::project::project_point_line;
use crate::types::Bary;

/// Row `i1` holds the (unnormalized) barycentric coordinate of the closest
/// point on edge `(i1, i1 - 1)`. Row sums equal the edge's distance sum.
pub fn bary_edges(bary: &Bary) -> Result<DMatrix<f64>> {
    let poly = Polygon::new(bary.dim())?;
    bary_edges_in(bary, &poly)
}

/// Same as [`bary_edges`] with a prebuilt polygon.
pub fn bary_edges_in(bary: &Bary, poly: &Polygon) -> Result<DMatrix<f64>> {
    let d = poly.d();
    let corners = poly.corners();
    let cart = to_cartesian_with(bary, corners)?;

    let mut e = DMatrix::zeros(d, d);
    for (i1, i2) in poly.edges() {
        let proj = project_point_line(cart, corners[i1], corners[i2])?;
        let dist = [(corners[i1] - proj).norm(), (corners[i2] - proj).norm()];
        let total = dist[0] + dist[1];
        e[(i1, i1)] += total - dist[0];
        e[(i1, i2)] += total - dist[1];
    }
    tracing::debug!(d, x = cart.x, y = cart.y, "bary_edges");
    Ok(e)
}

/// Edge projections for a batch sharing one corner count (atomic).
pub fn bary_edges_batch(batch: &[Bary]) -> Result<Vec<DMatrix<f64>>> {
    match shared_dim(batch)? {
        None => Ok(Vec::new()),
        Some(d) => bary_edges_batch_in(batch, &Polygon::new(d)?),
    }
}

/// [`bary_edges_batch`] with the polygon taken from `cache`.
pub fn bary_edges_batch_cached(
    cache: &CornerCache,
    batch: &[Bary],
) -> Result<Vec<DMatrix<f64>>> {
    match shared_dim(batch)? {
        None => Ok(Vec::new()),
        Some(d) => bary_edges_batch_in(batch, &cache.polygon(d)?),
    }
}

fn bary_edges_batch_in(batch: &[Bary], poly: &Polygon) -> Result<Vec<DMatrix<f64>>> {
    batch.iter().map(|b| bary_edges_in(b, poly)).collect()
}

/// Divide each row by its sum so every row is a normalized coordinate.
pub fn normalize_rows(e: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    let mut out = e.clone();
    for (r, mut row) in out.row_iter_mut().enumerate() {
        let s = row.sum();
        if s == 0.0 || !s.is_finite() {
            return Err(BaryError::invalid(format!("row {r} has sum {s}")));
        }
        row /= s;
    }
    Ok(out)
}
