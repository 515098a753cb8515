// Profit waterfall as horizontal text bars
use shared::models::WaterfallPoint;
use shared::utils::format_si;

use crate::config::theme::{ThemePalette, Tone};
use crate::config::ChartConfig;

// Bar length for `value`, scaled so the largest magnitude fills `width`.
fn bar_len(value: f64, max_abs: f64, width: usize) -> usize {
    if max_abs <= 0.0 || !value.is_finite() {
        return 0;
    }
    ((value.abs() / max_abs) * width as f64).round() as usize
}

pub fn render(points: &[WaterfallPoint], chart: &ChartConfig, palette: &ThemePalette) -> String {
    let max_abs = points.iter().map(|p| p.value.abs()).fold(0.0, f64::max);
    let label_width = points.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&palette.paint(Tone::Muted, &chart.title));
    out.push('\n');
    for point in points {
        let len = bar_len(point.value, max_abs, chart.width);
        let (glyph, style) = if point.value < 0.0 {
            (chart.negative_bar_char, Tone::Negative)
        } else {
            (chart.bar_char, Tone::Bar)
        };
        let bar: String = std::iter::repeat(glyph).take(len).collect();
        out.push_str(&format!(
            "{:<label_width$} | {} {}\n",
            point.label,
            palette.paint(style, &bar),
            format_si(point.value)
        ));
    }
    out
}
