mod figure;
mod input;
mod provenance;

use anyhow::{Context, Result};
use barycentric::display::{show_matrices, text_matrix, DisplayCfg};
use barycentric::prelude::*;
use clap::{Parser, Subcommand, ValueEnum};
use nalgebra::DMatrix;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

use figure::{draw_figure, FigureCfg, FigurePoint};
use input::{gather, Weights};

#[derive(Parser)]
#[command(name = "bary")]
#[command(about = "Barycentric coordinates over regular convex polygons")]
struct Cmd {
    /// Output format for results
    #[arg(long, value_enum, global = true, default_value_t = Format::Json)]
    format: Format,

    /// Maximum decimal places for text/latex output (truncated, not rounded)
    #[arg(long, global = true, default_value_t = DisplayCfg::default().prec)]
    prec: u32,

    /// LaTeX labels: before, between, after (repeat up to three times)
    #[arg(long = "label", global = true)]
    labels: Vec<String>,

    /// Write the result to this file (plus a provenance sidecar) instead of
    /// stdout; required for `figure`, which writes SVG
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
    Latex,
}

#[derive(Subcommand)]
enum Action {
    /// Cartesian corners of the regular d-gon
    Corners {
        #[arg(long)]
        d: usize,
    },
    /// Convert barycentric coordinates to Cartesian points
    Convert {
        /// Comma-separated weights; repeat for several coordinates
        #[arg(long)]
        coords: Vec<Weights>,
        /// CSV file with a header row and one coordinate per row
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Deduplicated lattice of reference coordinates
    Lattice {
        #[arg(long)]
        d: usize,
        /// Include the midpoints of corner pairs
        #[arg(long)]
        sides: bool,
    },
    /// Closest point on each polygon edge, in barycentric form
    Edges {
        #[arg(long)]
        coords: Vec<Weights>,
        #[arg(long)]
        input: Option<PathBuf>,
        /// Divide every row by its sum
        #[arg(long)]
        normalize: bool,
    },
    /// Render coordinates inside their polygon as SVG
    Figure {
        #[arg(long)]
        coords: Vec<Weights>,
        #[arg(long)]
        input: Option<PathBuf>,
        /// Plot the lattice for this corner count as well
        #[arg(long)]
        lattice: Option<usize>,
        #[arg(long)]
        label_vertices: bool,
        /// Draw lines to the closest point on every edge
        #[arg(long)]
        edges: bool,
        /// Point colour; repeat to give one colour per coordinate
        #[arg(long = "color")]
        colors: Vec<String>,
    },
    /// Reproducible uniform random coordinates
    Sample {
        #[arg(long)]
        d: usize,
        #[arg(long, default_value_t = 10)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

/// A command result: JSON for machines, matrices for text/latex display.
#[derive(Debug)]
struct Rendered {
    params: Value,
    json: Value,
    matrices: Vec<DMatrix<f64>>,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let cache = CornerCache::new();
    let rendered = match cmd.action {
        Action::Corners { d } => corners_cmd(&cache, d)?,
        Action::Convert { coords, input } => {
            convert_cmd(&cache, gather(coords, input.as_deref())?)?
        }
        Action::Lattice { d, sides } => lattice_cmd(d, sides)?,
        Action::Edges {
            coords,
            input,
            normalize,
        } => edges_cmd(&cache, gather(coords, input.as_deref())?, normalize)?,
        Action::Figure {
            coords,
            input,
            lattice,
            label_vertices,
            edges,
            colors,
        } => {
            let svg_path = cmd
                .out
                .as_deref()
                .context("figure needs --out <file.svg>")?;
            let cfg = FigureCfg {
                label_vertices,
                show_edges: edges,
                ..FigureCfg::default()
            };
            let request = FigureRequest {
                coords,
                input,
                lattice,
                colors,
            };
            return figure_cmd(&cache, request, &cfg, svg_path);
        }
        Action::Sample { d, count, seed } => sample_cmd(d, count, seed)?,
    };
    emit(&rendered, cmd.format, cmd.prec, &cmd.labels, cmd.out.as_deref())
}

fn corners_cmd(cache: &CornerCache, d: usize) -> Result<Rendered> {
    tracing::info!(d, "corners");
    let cs = cache.get(d)?;
    Ok(Rendered {
        params: json!({ "cmd": "corners", "d": d }),
        json: json!(points_json(&cs)),
        matrices: vec![points_matrix(&cs)],
    })
}

fn convert_cmd(cache: &CornerCache, batch: Vec<Bary>) -> Result<Rendered> {
    tracing::info!(count = batch.len(), "convert");
    let pts = to_cartesian_batch_cached(cache, &batch)?;
    Ok(Rendered {
        params: json!({ "cmd": "convert", "coords": weights_json(&batch) }),
        json: json!(points_json(&pts)),
        matrices: vec![points_matrix(&pts)],
    })
}

fn lattice_cmd(d: usize, sides: bool) -> Result<Rendered> {
    tracing::info!(d, sides, "lattice");
    let l = lattice(d, sides)?;
    Ok(Rendered {
        params: json!({ "cmd": "lattice", "d": d, "sides": sides }),
        json: json!(weights_json(l.as_slice())),
        matrices: vec![weights_matrix(l.as_slice(), d)],
    })
}

fn edges_cmd(cache: &CornerCache, batch: Vec<Bary>, normalize: bool) -> Result<Rendered> {
    tracing::info!(count = batch.len(), normalize, "edges");
    let mut ms = bary_edges_batch_cached(cache, &batch)?;
    if normalize {
        ms = ms.iter().map(normalize_rows).collect::<barycentric::Result<_>>()?;
    }
    let json = batch
        .iter()
        .zip(&ms)
        .map(|(b, e)| json!({ "coords": b.weights(), "edges": matrix_json(e) }))
        .collect::<Vec<_>>();
    Ok(Rendered {
        params: json!({ "cmd": "edges", "coords": weights_json(&batch), "normalize": normalize }),
        json: Value::Array(json),
        matrices: ms,
    })
}

fn sample_cmd(d: usize, count: usize, seed: u64) -> Result<Rendered> {
    tracing::info!(d, count, seed, "sample");
    let batch = draw_batch(d, seed, count)?;
    Ok(Rendered {
        params: json!({ "cmd": "sample", "d": d, "count": count, "seed": seed }),
        json: json!(weights_json(&batch)),
        matrices: vec![weights_matrix(&batch, d)],
    })
}

/// What to plot in a figure.
struct FigureRequest {
    coords: Vec<Weights>,
    input: Option<PathBuf>,
    lattice: Option<usize>,
    colors: Vec<String>,
}

/// One colour per coordinate: none means blue, one is shared by all.
fn point_colors(colors: &[String], count: usize) -> Result<Vec<String>> {
    match colors {
        [] => Ok(vec!["blue".to_string(); count]),
        [one] => Ok(vec![one.clone(); count]),
        many if many.len() == count => Ok(many.to_vec()),
        many => anyhow::bail!("{} colours given for {count} coordinates", many.len()),
    }
}

fn figure_cmd(
    cache: &CornerCache,
    req: FigureRequest,
    cfg: &FigureCfg,
    svg_path: &Path,
) -> Result<()> {
    let mut points = Vec::new();
    if let Some(d) = req.lattice {
        for b in &lattice(d, false)? {
            points.push(FigurePoint {
                bary: b.clone(),
                label: String::new(),
                color: "gray".to_string(),
            });
        }
    }
    if !req.coords.is_empty() || req.input.is_some() {
        let batch = gather(req.coords, req.input.as_deref())?;
        let colors = point_colors(&req.colors, batch.len())?;
        for (i, (b, color)) in batch.into_iter().zip(colors).enumerate() {
            points.push(FigurePoint {
                bary: b,
                label: format!("p_{i}"),
                color,
            });
        }
    }
    let d = match (req.lattice, points.first()) {
        (Some(d), _) => d,
        (None, Some(p)) => p.bary.dim(),
        (None, None) => anyhow::bail!("nothing to draw; use --coords, --input or --lattice"),
    };
    tracing::info!(d, points = points.len(), svg = %svg_path.display(), "figure");

    let doc = draw_figure(cache, d, &points, cfg)?;
    create_parent(svg_path)?;
    svg::save(svg_path, &doc).with_context(|| format!("writing {}", svg_path.display()))?;
    let params = json!({
        "cmd": "figure",
        "d": d,
        "coords": points.iter().map(|p| p.bary.weights().to_vec()).collect::<Vec<_>>(),
        "colors": points.iter().map(|p| p.color.as_str()).collect::<Vec<_>>(),
        "label_vertices": cfg.label_vertices,
        "edges": cfg.show_edges,
    });
    provenance::write_sidecar(svg_path, params)?;
    Ok(())
}

fn emit(
    r: &Rendered,
    format: Format,
    prec: u32,
    labels: &[String],
    out: Option<&Path>,
) -> Result<()> {
    let body = match format {
        Format::Json => serde_json::to_string_pretty(&r.json)?,
        Format::Text => r
            .matrices
            .iter()
            .map(|m| text_matrix(m, prec))
            .collect::<Vec<_>>()
            .join("\n\n"),
        Format::Latex => {
            let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
            show_matrices(&r.matrices, &labels, prec)
        }
    };
    match out {
        None => println!("{body}"),
        Some(path) => {
            create_parent(path)?;
            std::fs::write(path, format!("{body}\n"))
                .with_context(|| format!("writing {}", path.display()))?;
            provenance::write_sidecar(path, r.params.clone())?;
            tracing::info!(out = %path.display(), "written");
        }
    }
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn points_json(pts: &[Point2]) -> Vec<[f64; 2]> {
    pts.iter().map(|p| [p.x, p.y]).collect()
}

fn weights_json(batch: &[Bary]) -> Vec<Vec<f64>> {
    batch.iter().map(|b| b.weights().to_vec()).collect()
}

fn matrix_json(m: &DMatrix<f64>) -> Vec<Vec<f64>> {
    m.row_iter().map(|r| r.iter().copied().collect()).collect()
}

fn points_matrix(pts: &[Point2]) -> DMatrix<f64> {
    DMatrix::from_fn(pts.len(), 2, |r, c| pts[r][c])
}

fn weights_matrix(batch: &[Bary], d: usize) -> DMatrix<f64> {
    DMatrix::from_fn(batch.len(), d, |r, c| batch[r].weights()[c])
}
