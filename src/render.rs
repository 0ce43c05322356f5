use std::fmt::Write as _;
use std::path::Path;

use crate::types::{CuttingPlan, PieceDemand, WasteFigure};

const MAX_WIDTH: f64 = 80.0;

/// Plain-text cutting list: requested pieces, the plan, then totals.
pub fn render_report(demands: &[PieceDemand], plan: &CuttingPlan, waste: WasteFigure) -> String {
    let mut out = String::new();

    out.push_str("Requested pieces\n");
    for d in demands {
        let _ = writeln!(out, "Length: {}, Quantity: {}", d.length, d.quantity);
    }

    out.push_str("\nCutting plan\n");
    for (i, entry) in plan.entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "Pattern {}: {:?} x {}",
            i + 1,
            entry.pattern,
            entry.repeat_count
        );
    }

    // Every requested mm is cut, so the plan's cut length is the demand total.
    let _ = writeln!(out, "\nStock bars required: {}", plan.total_bars);
    let _ = writeln!(out, "Total length: {:.2} m", plan.cut_length() as f64 / 1000.0);
    if matches!(waste, WasteFigure::Last | WasteFigure::Both) {
        let _ = writeln!(out, "Leftover on last bar: {} mm", plan.last_bar_waste);
    }
    if matches!(waste, WasteFigure::Total | WasteFigure::Both) {
        let _ = writeln!(
            out,
            "Total waste: {} mm ({:.1}%)",
            plan.total_waste,
            plan.waste_percent()
        );
    }

    out
}

/// Draws one bar as a strip scaled to at most 80 columns. Pieces are drawn
/// with `-` between `|` cuts, the leftover with `.`.
pub fn render_bar(stock_length: u64, pattern: &[u64]) -> String {
    if stock_length == 0 {
        return String::new();
    }

    let scale = MAX_WIDTH / stock_length as f64;
    let width = (stock_length as f64 * scale).round() as usize;
    let mut row = vec!['.'; width + 1];
    row[0] = '|';

    let mut offset = 0u64;
    let mut start = 0usize;
    for &piece in pattern {
        offset += piece;
        let end = ((offset as f64 * scale).round() as usize).min(width);

        for cell in row.iter_mut().take(end).skip(start + 1) {
            *cell = '-';
        }
        row[end] = '|';
        draw_label(&mut row, start, end, &piece.to_string());

        start = end;
    }
    row[width] = '|';

    let mut line: String = row.into_iter().collect();
    line.push('\n');
    line
}

/// Centres `label` between the cuts at `start` and `end` if it fits with a
/// cell of margin on each side.
fn draw_label(row: &mut [char], start: usize, end: usize, label: &str) {
    let inner = end.saturating_sub(start + 1);
    let len = label.chars().count();
    if len + 2 > inner {
        return;
    }
    let first = start + 1 + (inner - len) / 2;
    for (i, ch) in label.chars().enumerate() {
        row[first + i] = ch;
    }
}

pub fn export_report(path: &Path, report: &str) -> std::io::Result<()> {
    std::fs::write(path, report)
}
