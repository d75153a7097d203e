use anyhow::Result;
use barycentric::prelude::*;
use svg::{
    node::{
        element::{Circle, Group, Line, Polygon as SvgPolygon, Text},
        Comment, Text as TextNode,
    },
    Document,
};

/// Styling for polygon figures.
#[derive(Clone, Debug)]
pub struct FigureCfg {
    /// Rendered width and height in pixels.
    pub size: u32,
    pub corner_color: String,
    pub label_vertices: bool,
    /// Distance between a point and its label, in unit-square coordinates.
    pub label_dist: f64,
    /// Draw the closest point on every edge for each input point.
    pub show_edges: bool,
}

impl Default for FigureCfg {
    fn default() -> Self {
        Self {
            size: 400,
            corner_color: "red".to_string(),
            label_vertices: false,
            label_dist: 1.0 / 15.0,
            show_edges: false,
        }
    }
}

/// A coordinate to plot, with its label and colour.
#[derive(Clone, Debug)]
pub struct FigurePoint {
    pub bary: Bary,
    pub label: String,
    pub color: String,
}

/// Offset of a label from `pt`, pointing away from `center`.
///
/// The direction is `pt - center` scaled to unit L1 norm; a point on the
/// centre gets its label straight above.
pub fn label_offset(pt: Point2, center: Point2, dist: f64) -> Point2 {
    let vert = pt - center;
    let s = vert.x.abs() + vert.y.abs();
    let dir = if s == 0.0 {
        Point2::new(0.0, 1.0)
    } else {
        vert / s
    };
    dir * dist
}

/// Render the `d`-gon with every point of `points` inside it.
///
/// All points must share the corner count `d`.
pub fn draw_figure(
    cache: &CornerCache,
    d: usize,
    points: &[FigurePoint],
    cfg: &FigureCfg,
) -> Result<Document> {
    let poly = cache.polygon(d)?;
    let batch: Vec<Bary> = points.iter().map(|p| p.bary.clone()).collect();
    if let Some(bad) = batch.iter().find(|b| b.dim() != d) {
        return Err(BaryError::DimensionMismatch {
            expected: d,
            got: bad.dim(),
        }
        .into());
    }
    let cart = to_cartesian_batch_with(&batch, poly.corners())?;

    let mut document = Document::new()
        .set("viewBox", (-0.1, -0.1, 1.2, 1.2))
        .set("width", cfg.size)
        .set("height", cfg.size)
        .add(Comment::new(format!("{d}-gon, {} points", points.len())))
        .add(
            SvgPolygon::new()
                .set(
                    "points",
                    poly.corners()
                        .iter()
                        .map(|c| {
                            let (x, y) = to_svg(*c);
                            (x, y)
                        })
                        .collect::<Vec<_>>(),
                )
                .set("fill", "none")
                .set("stroke", "black")
                .set("stroke-opacity", 0.5)
                .set("stroke-width", 0.004),
        );

    if cfg.show_edges {
        let mut lines = Group::new()
            .set("stroke", "gray")
            .set("stroke-width", 0.003)
            .set("stroke-dasharray", "0.01 0.01");
        for (b, p) in batch.iter().zip(&cart) {
            let e = normalize_rows(&bary_edges_in(b, &poly)?)?;
            for row in e.row_iter() {
                let w = Bary::new(row.iter().copied().collect::<Vec<_>>())?;
                let q = to_cartesian_with(&w, poly.corners())?;
                lines = lines.add(line(*p, q));
            }
        }
        document = document.add(lines);
    }

    let mut corners = Group::new().set("fill", cfg.corner_color.as_str());
    for (i, c) in poly.corners().iter().enumerate() {
        corners = corners.add(dot(*c, 0.015));
        if cfg.label_vertices {
            corners = corners.add(label(*c, &format!("v_{i}"), cfg));
        }
    }
    document = document.add(corners);

    for (fp, p) in points.iter().zip(&cart) {
        let mut group = Group::new()
            .set("fill", fp.color.as_str())
            .add(dot(*p, 0.02));
        if !fp.label.is_empty() {
            group = group.add(label(*p, &fp.label, cfg));
        }
        document = document.add(group);
    }
    tracing::debug!(d, points = points.len(), edges = cfg.show_edges, "figure");
    Ok(document)
}

// The embedding uses y-up; SVG uses y-down.
fn to_svg(p: Point2) -> (f64, f64) {
    (p.x, 1.0 - p.y)
}

fn dot(p: Point2, r: f64) -> Circle {
    let (x, y) = to_svg(p);
    Circle::new().set("cx", x).set("cy", y).set("r", r)
}

fn line(from: Point2, to: Point2) -> Line {
    let (x1, y1) = to_svg(from);
    let (x2, y2) = to_svg(to);
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
}

fn label(p: Point2, txt: &str, cfg: &FigureCfg) -> Text {
    let (x, y) = to_svg(p + label_offset(p, center(), cfg.label_dist));
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("font-size", 0.05)
        .set("text-anchor", "middle")
        .set("dominant-baseline", "central")
        .add(TextNode::new(txt))
}
