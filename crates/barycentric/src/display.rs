//! Human-readable output: decimal truncation and matrix formatting.
//!
//! Truncation keeps at most `prec` decimals by cutting toward zero
//! (`trunc(v · 10^prec) / 10^prec`), matching an integer cast. Negative
//! values therefore move up (−1.2349 → −1.234), not down; this is the chosen
//! behaviour and is kept out of the geometry modules.

use nalgebra::DMatrix;

/// Display configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayCfg {
    /// Maximum number of decimal places.
    pub prec: u32,
}

impl Default for DisplayCfg {
    fn default() -> Self {
        Self { prec: 3 }
    }
}

/// Truncate `v` to at most `prec` decimals (toward zero).
#[inline]
pub fn limit_prec(v: f64, prec: u32) -> f64 {
    let scale = 10f64.powi(prec as i32);
    (v * scale).trunc() / scale
}

/// Element-wise [`limit_prec`].
pub fn limit_prec_matrix(m: &DMatrix<f64>, prec: u32) -> DMatrix<f64> {
    m.map(|v| limit_prec(v, prec))
}

/// LaTeX `matrix` of the truncated entries, wrapped in square brackets.
pub fn latex_matrix(m: &DMatrix<f64>, prec: u32) -> String {
    let t = limit_prec_matrix(m, prec);
    let rows: Vec<String> = t
        .row_iter()
        .map(|row| {
            row.iter()
                .map(|v| format_value(*v))
                .collect::<Vec<_>>()
                .join(" & ")
        })
        .collect();
    format!(
        "\\left[\\begin{{matrix}}{}\\end{{matrix}}\\right]",
        rows.join("\\\\")
    )
}

/// Several matrices in one display-math block.
///
/// `labels` is `(before, between, after)`; missing entries default to "".
/// The result reads `before$$m_1 between m_2 ...$$after`.
pub fn show_matrices(ms: &[DMatrix<f64>], labels: &[&str], prec: u32) -> String {
    let label = |i: usize| labels.get(i).copied().unwrap_or("");
    let body: Vec<String> = ms.iter().map(|m| latex_matrix(m, prec)).collect();
    format!("{}$${}$${}", label(0), body.join(label(1)), label(2))
}

/// Plain-text rendering: one row per line, columns right-aligned.
pub fn text_matrix(m: &DMatrix<f64>, prec: u32) -> String {
    let cells: Vec<Vec<String>> = limit_prec_matrix(m, prec)
        .row_iter()
        .map(|row| row.iter().map(|v| format_value(*v)).collect())
        .collect();
    let width = cells
        .iter()
        .flat_map(|r| r.iter().map(String::len))
        .max()
        .unwrap_or(0);
    cells
        .iter()
        .map(|r| {
            r.iter()
                .map(|c| format!("{c:>width$}"))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_value(v: f64) -> String {
    // `trunc` can leave -0.0 behind; print it as 0
    if v == 0.0 {
        "0".to_string()
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dmatrix;

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(limit_prec(1.23456, 3), 1.234);
        assert_eq!(limit_prec(0.9999, 3), 0.999);
        assert_eq!(limit_prec(-1.23456, 3), -1.234);
        assert_eq!(limit_prec(-0.0004, 3), 0.0);
        assert_eq!(limit_prec(2.5, 0), 2.0);
        assert_eq!(DisplayCfg::default().prec, 3);
    }

    #[test]
    fn latex_layout() {
        let m = dmatrix![1.0, 0.0; 1.0 / 3.0, 0.66666];
        assert_eq!(
            latex_matrix(&m, 3),
            "\\left[\\begin{matrix}1 & 0\\\\0.333 & 0.666\\end{matrix}\\right]"
        );
    }

    #[test]
    fn labels_default_to_empty() {
        let a = dmatrix![1.0];
        let b = dmatrix![0.5];
        let one = show_matrices(&[a.clone()], &["E ="], 3);
        assert_eq!(one, "E =$$\\left[\\begin{matrix}1\\end{matrix}\\right]$$");
        let two = show_matrices(&[a, b], &["", " \\to ", "."], 3);
        assert_eq!(
            two,
            "$$\\left[\\begin{matrix}1\\end{matrix}\\right] \\to \\left[\\begin{matrix}0.5\\end{matrix}\\right]$$."
        );
    }

    #[test]
    fn text_columns_align() {
        let m = dmatrix![1.0, 0.25; -0.0001, 10.0];
        assert_eq!(text_matrix(&m, 3), "   1  0.25\n   0    10");
    }
}
