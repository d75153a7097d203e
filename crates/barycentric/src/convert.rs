//! Barycentric → Cartesian conversion.
//!
//! result = Σ_i (w_i / Σw) · corner_i. Weights are normalized before use;
//! a zero (or non-finite) sum is rejected instead of producing NaN.

use crate::error::{BaryError, Result};
use crate::polygon::{corners, CornerCache};
use crate::types::{Bary, Point2};

/// Convert one coordinate using the regular polygon with `bary.dim()` corners.
pub fn to_cartesian(bary: &Bary) -> Result<Point2> {
    let cs = corners(bary.dim())?;
    to_cartesian_with(bary, &cs)
}

/// Convert one coordinate against explicit corners.
pub fn to_cartesian_with(bary: &Bary, corners: &[Point2]) -> Result<Point2> {
    if bary.dim() != corners.len() {
        return Err(BaryError::mismatch(corners.len(), bary.dim()));
    }
    let w = bary.normalized()?;
    Ok(w
        .weights()
        .iter()
        .zip(corners)
        .fold(Point2::zeros(), |acc, (&wi, c)| acc + c * wi))
}

/// Convert a batch sharing one corner count; output order follows input order.
///
/// Atomic: the first invalid element aborts the whole call.
pub fn to_cartesian_batch(batch: &[Bary]) -> Result<Vec<Point2>> {
    match shared_dim(batch)? {
        None => Ok(Vec::new()),
        Some(d) => to_cartesian_batch_with(batch, &corners(d)?),
    }
}

/// Convert one coordinate with corners looked up in `cache`.
pub fn to_cartesian_cached(cache: &CornerCache, bary: &Bary) -> Result<Point2> {
    to_cartesian_with(bary, &cache.get(bary.dim())?)
}

/// [`to_cartesian_batch`] with corners looked up in `cache`.
pub fn to_cartesian_batch_cached(cache: &CornerCache, batch: &[Bary]) -> Result<Vec<Point2>> {
    match shared_dim(batch)? {
        None => Ok(Vec::new()),
        Some(d) => to_cartesian_batch_with(batch, &cache.get(d)?),
    }
}

/// Corner count shared by every element; `None` for an empty batch.
pub(crate) fn shared_dim(batch: &[Bary]) -> Result<Option<usize>> {
    let Some(first) = batch.first() else {
        return Ok(None);
    };
    let d = first.dim();
    match batch.iter().find(|b| b.dim() != d) {
        Some(bad) => Err(BaryError::mismatch(d, bad.dim())),
        None => Ok(Some(d)),
    }
}

/// Batch conversion against explicit corners.
pub fn to_cartesian_batch_with(batch: &[Bary], corners: &[Point2]) -> Result<Vec<Point2>> {
    batch
        .iter()
        .map(|b| to_cartesian_with(b, corners))
        .collect()
}
