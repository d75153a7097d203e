//! Coordinate input: comma-separated weights on the command line or a CSV file.

use anyhow::{anyhow, bail, Context, Result};
use barycentric::Bary;
use polars::prelude::*;
use std::path::Path;
use std::str::FromStr;

/// One coordinate given as `w0,w1,...` on the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct Weights(pub Vec<f64>);

impl FromStr for Weights {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let w = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|e| format!("weight {part:?}: {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if w.len() < 2 {
            return Err(format!("{s:?}: need at least two comma-separated weights"));
        }
        Ok(Weights(w))
    }
}

/// Read one coordinate per row; every column is a corner. The first row is a header.
pub fn read_csv(path: &Path) -> Result<Vec<Bary>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::info!(rows = df.height(), cols = df.width(), "input_csv_shape");

    let mut rows: Vec<Vec<f64>> = vec![Vec::with_capacity(df.width()); df.height()];
    for col in df.get_columns() {
        let col = col.cast(&DataType::Float64)?;
        let values = col.f64()?;
        for (r, (row, v)) in rows.iter_mut().zip(values.into_iter()).enumerate() {
            let v = v.ok_or_else(|| anyhow!("row {r}: missing value in column {}", col.name()))?;
            row.push(v);
        }
    }
    rows.into_iter()
        .map(|w| Bary::new(w).map_err(anyhow::Error::from))
        .collect()
}

/// Merge CSV rows (first) and command-line coordinates into one batch.
pub fn gather(coords: Vec<Weights>, input: Option<&Path>) -> Result<Vec<Bary>> {
    let mut out = match input {
        Some(path) => read_csv(path)?,
        None => Vec::new(),
    };
    for Weights(w) in coords {
        out.push(Bary::new(w)?);
    }
    if out.is_empty() {
        bail!("no coordinates given; use --coords or --input");
    }
    Ok(out)
}
