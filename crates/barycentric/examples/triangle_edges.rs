//! Edge projections of a triangle lattice, printed as truncated matrices.
//!
//! Run with `cargo run -p barycentric --example triangle_edges`.

use barycentric::display::{text_matrix, DisplayCfg};
use barycentric::prelude::*;

fn main() -> Result<()> {
    let cfg = DisplayCfg::default();
    let grid = lattice(3, false)?;
    for b in &grid {
        let p = to_cartesian(b)?;
        let e = normalize_rows(&bary_edges(b)?)?;
        println!("w = {:?} -> ({:.3}, {:.3})", b.weights(), p.x, p.y);
        println!("{}\n", text_matrix(&e, cfg.prec));
    }
    Ok(())
}
