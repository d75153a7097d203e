//! Barycentric coordinates over regular convex polygons.
//!
//! A polygon is identified by its corner count `d`; its corners lie on the
//! circle of radius 0.5 around (0.5, 0.5), counter-clockwise from the top.
//! A barycentric coordinate is one weight per corner.
//!
//! Modules
//! - `polygon`: corner placement and a shared corner cache.
//! - `project`: point-to-line projection.
//! - `convert`: barycentric → Cartesian (single and batch).
//! - `lattice`: deduplicated sampling grid of coordinates.
//! - `edges`: closest point on every edge, back in barycentric form.
//! - `display`: decimal truncation and matrix formatting.
//! - `rand`: reproducible random coordinates.

pub mod convert;
pub mod display;
pub mod edges;
pub mod error;
pub mod lattice;
pub mod polygon;
pub mod project;
pub mod rand;
pub mod types;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use convert::{to_cartesian, to_cartesian_batch, to_cartesian_with};
pub use edges::{bary_edges, normalize_rows};
pub use error::{BaryError, Result};
pub use lattice::{lattice, Lattice};
pub use polygon::{corners, Polygon};
pub use project::project_point_line;
pub use types::{Bary, GeomCfg, Point2, Segment};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::convert::{
        to_cartesian, to_cartesian_batch, to_cartesian_batch_cached, to_cartesian_batch_with,
        to_cartesian_cached, to_cartesian_with,
    };
    pub use crate::display::{latex_matrix, limit_prec, limit_prec_matrix, DisplayCfg};
    pub use crate::edges::{
        bary_edges, bary_edges_batch, bary_edges_batch_cached, bary_edges_in, normalize_rows,
    };
    pub use crate::error::{BaryError, Result};
    pub use crate::lattice::{lattice, Lattice};
    pub use crate::polygon::{center, corners, CornerCache, Polygon};
    pub use crate::project::{line_parameter, project_point_line, project_point_segment};
    pub use crate::rand::{draw_bary, draw_batch, ReplayToken};
    pub use crate::types::{Bary, GeomCfg, Point2, Segment};
    pub use nalgebra::{DMatrix, Vector2 as Vec2};
}
