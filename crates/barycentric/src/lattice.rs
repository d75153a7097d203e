//! Fixed sampling grid of barycentric coordinates.
//!
//! The lattice for `d` corners is built from the corners, the centroid, the
//! corner/centroid midpoints, the corner-pair/centroid averages and, on
//! request, the side midpoints. Coincident values (e.g. at `d = 2`) are
//! removed by exact floating-point equality.

use std::cmp::Ordering;

use nalgebra::DVector;

use crate::error::Result;
use crate::polygon::check_corner_count;
use crate::types::Bary;

/// Immutable, duplicate-free set of barycentric coordinates of one dimension.
///
/// Iteration order is lexicographic in the weights (`f64::total_cmp`).
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
    d: usize,
    coords: Vec<Bary>,
}

impl Lattice {
    #[inline]
    pub fn d(&self) -> usize {
        self.d
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
    #[inline]
    pub fn as_slice(&self) -> &[Bary] {
        &self.coords
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Bary> {
        self.coords.iter()
    }
    /// Exact membership test.
    pub fn contains(&self, weights: &[f64]) -> bool {
        self.coords
            .binary_search_by(|c| cmp_weights(c.weights(), weights))
            .is_ok()
    }
}

impl<'a> IntoIterator for &'a Lattice {
    type Item = &'a Bary;
    type IntoIter = std::slice::Iter<'a, Bary>;
    fn into_iter(self) -> Self::IntoIter {
        self.coords.iter()
    }
}

/// Build the lattice for `d` corners; `include_sides` adds pairwise side midpoints.
pub fn lattice(d: usize, include_sides: bool) -> Result<Lattice> {
    check_corner_count(d)?;

    // 1. Corners.
    let units: Vec<DVector<f64>> = (0..d)
        .map(|i| {
            let mut e = DVector::zeros(d);
            e[i] = 1.0;
            e
        })
        .collect();
    let mut raw = units.clone();

    // 2. Centroid.
    let center = DVector::from_element(d, 1.0 / d as f64);
    raw.push(center.clone());

    // 3. Corner pair + centroid.
    for i in 0..d {
        for j in i + 1..d {
            raw.push((&units[i] + &units[j] + &center) / 3.0);
        }
    }

    // 4. Corner + centroid.
    for e in &units {
        raw.push((e + &center) / 2.0);
    }

    // 5. Sides.
    if include_sides {
        for i in 0..d {
            for j in i + 1..d {
                raw.push((&units[i] + &units[j]) / 2.0);
            }
        }
    }

    let generated = raw.len();
    raw.sort_by(|a, b| cmp_weights(a.as_slice(), b.as_slice()));
    raw.dedup_by(|a, b| a.as_slice() == b.as_slice());
    tracing::debug!(d, include_sides, generated, unique = raw.len(), "lattice");

    Ok(Lattice {
        d,
        coords: raw.into_iter().map(Bary::from_vector).collect(),
    })
}

fn cmp_weights(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BaryError;

    const THIRD: f64 = 1.0 / 3.0;

    /// Every value the triangle lattice must hold, sides last.
    fn triangle_values(sides: bool) -> Vec<[f64; 3]> {
        let pair = (1.0 + THIRD) / 3.0;
        let rest = THIRD / 3.0;
        let half = (1.0 + THIRD) / 2.0;
        let low = THIRD / 2.0;
        let mut v = vec![
            // corners
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            // centroid
            [THIRD, THIRD, THIRD],
            // (e_i + e_j + c) / 3
            [pair, pair, rest],
            [pair, rest, pair],
            [rest, pair, pair],
            // (e_i + c) / 2
            [half, low, low],
            [low, half, low],
            [low, low, half],
        ];
        if sides {
            v.extend([[0.5, 0.5, 0.0], [0.5, 0.0, 0.5], [0.0, 0.5, 0.5]]);
        }
        v
    }

    #[test]
    fn triangle_without_sides() {
        let l = lattice(3, false).unwrap();
        let expected = triangle_values(false);
        assert_eq!(l.d(), 3);
        assert_eq!(l.len(), 10);
        assert_eq!(expected.len(), 10);
        for w in &expected {
            assert!(l.contains(w), "missing {w:?}");
        }
        assert!(!l.contains(&[0.5, 0.5, 0.0]));
    }

    #[test]
    fn triangle_with_sides() {
        let l = lattice(3, true).unwrap();
        let expected = triangle_values(true);
        assert_eq!(l.len(), 13);
        assert_eq!(expected.len(), 13);
        for w in &expected {
            assert!(l.contains(w), "missing {w:?}");
        }
    }

    #[test]
    fn two_corners_collapse_duplicates() {
        // centroid, both pair averages and the side midpoint all equal (0.5, 0.5)
        let l = lattice(2, true).unwrap();
        assert_eq!(l.len(), 5);
        assert!(l.contains(&[0.5, 0.5]));
        assert!(l.contains(&[0.75, 0.25]));
        assert_eq!(lattice(2, false).unwrap().len(), 5);
    }

    #[test]
    fn elements_are_normalized_and_sorted() {
        for d in 2..=7 {
            for sides in [false, true] {
                let l = lattice(d, sides).unwrap();
                for c in &l {
                    assert_eq!(c.dim(), d);
                    assert!(c.is_normalized_eps(1e-12));
                }
                for w in l.as_slice().windows(2) {
                    assert_eq!(cmp_weights(w[0].weights(), w[1].weights()), Ordering::Less);
                }
            }
        }
    }

    #[test]
    fn size_formula_for_larger_polygons() {
        // d + 1 + C(d,2) + d, plus C(d,2) sides; no coincidences for d >= 3
        for d in 3..=8 {
            let pairs = d * (d - 1) / 2;
            assert_eq!(lattice(d, false).unwrap().len(), 2 * d + 1 + pairs);
            assert_eq!(lattice(d, true).unwrap().len(), 2 * d + 1 + 2 * pairs);
        }
    }

    #[test]
    fn rejects_degenerate_corner_count() {
        assert!(matches!(lattice(1, false), Err(BaryError::InvalidArgument { .. })));
    }
}
