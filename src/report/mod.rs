//! Plain-text rendering of engine output.

use crate::graph::{DistanceMatrix, Path, QueryOutcome, Weight};

/// Formats one cell, trimming float noise.
fn format_weight(weight: &Weight) -> String {
    match weight {
        Weight::Finite(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", *v as i64),
        Weight::Finite(v) => format!("{:.3}", v),
        Weight::Infinite => "∞".to_string(),
    }
}

/// Renders the distance matrix as an aligned table, sources as rows.
pub fn render_distance_matrix(dist: &DistanceMatrix) -> String {
    let n = dist.size();
    if n == 0 {
        return "(empty graph)\n".to_string();
    }

    let cells: Vec<Vec<String>> = dist
        .rows()
        .map(|row| row.iter().map(format_weight).collect())
        .collect();

    let width = cells
        .iter()
        .flatten()
        .map(|c| c.chars().count())
        .chain(std::iter::once((n - 1).to_string().len()))
        .max()
        .unwrap_or(1);
    let label_width = (n - 1).to_string().len();

    let mut out = String::new();
    out.push_str(&format!("{:>label_width$} |", ""));
    for j in 0..n {
        out.push_str(&format!(" {:>width$}", j));
    }
    out.push('\n');
    out.push_str(&"-".repeat(label_width + 2 + n * (width + 1)));
    out.push('\n');

    for (i, row) in cells.iter().enumerate() {
        out.push_str(&format!("{:>label_width$} |", i));
        for cell in row {
            // `{:>}` pads by char count, so the ∞ glyph aligns too
            out.push_str(&format!(" {:>width$}", cell));
        }
        out.push('\n');
    }
    out
}

/// Renders a path as `0 → 1 → 2`.
pub fn render_path(path: &Path) -> String {
    if path.is_empty() {
        "(no path)".to_string()
    } else {
        path.to_string()
    }
}

/// Renders a query outcome for display.
pub fn render_outcome(from: usize, to: usize, outcome: &QueryOutcome) -> String {
    match outcome {
        QueryOutcome::Found { path, distance } => format!(
            "Shortest path {} → {}\n  Path: {}\n  Distance: {}",
            from,
            to,
            render_path(path),
            format_weight(distance)
        ),
        QueryOutcome::Unreachable => format!("No path exists from node {} to node {}", from, to),
    }
}
