//! Reproducible random barycentric coordinates.
//!
//! Model
//! - Uniform on the simplex: draw `d` independent Exp(1) variates via
//!   `-ln(U)` and normalize by their sum.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG,
//!   so draw `k` of a stream can be regenerated without drawing `0..k`.

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::polygon::check_corner_count;
use crate::types::Bary;

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw one normalized coordinate with `d` corners.
pub fn draw_bary(d: usize, tok: ReplayToken) -> Result<Bary> {
    check_corner_count(d)?;
    let mut rng = tok.to_std_rng();
    Ok(sample_simplex(&mut rng, d))
}

/// Draw `count` coordinates with indices `0..count` under one seed.
pub fn draw_batch(d: usize, seed: u64, count: usize) -> Result<Vec<Bary>> {
    (0..count as u64)
        .map(|index| draw_bary(d, ReplayToken { seed, index }))
        .collect()
}

fn sample_simplex<R: Rng>(rng: &mut R, d: usize) -> Bary {
    loop {
        // 1 - U lies in (0, 1], so ln never sees zero.
        let e: Vec<f64> = (0..d).map(|_| -(1.0 - rng.gen::<f64>()).ln()).collect();
        let s: f64 = e.iter().sum();
        if s > 0.0 {
            let w: Vec<f64> = e.into_iter().map(|x| x / s).collect();
            return Bary::from_vector(DVector::from_vec(w));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_token_same_draw() {
        let t = ReplayToken::new(7, 3);
        assert_eq!(draw_bary(4, t).unwrap(), draw_bary(4, t).unwrap());
        assert_ne!(
            draw_bary(4, t).unwrap(),
            draw_bary(4, ReplayToken::new(7, 4)).unwrap()
        );
    }

    #[test]
    fn draws_are_normalized() {
        for b in draw_batch(5, 42, 100).unwrap() {
            assert_eq!(b.dim(), 5);
            assert!(b.is_normalized_eps(1e-12));
        }
    }

    #[test]
    fn batch_index_matches_single_draw() {
        let batch = draw_batch(3, 9, 5).unwrap();
        assert_eq!(batch[4], draw_bary(3, ReplayToken::new(9, 4)).unwrap());
    }

    #[test]
    fn rejects_small_d() {
        assert!(draw_bary(1, ReplayToken::new(0, 0)).is_err());
    }
}
