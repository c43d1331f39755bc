//! Horizontal text bar chart of travel distances.

use crate::core::ChartSeries;
use crate::models::cell::format_number;
use crate::utils::colors::{CYAN, paint};
use unicode_width::UnicodeWidthStr;

const BAR: char = '█';

/// One bar per row, scaled so the longest distance spans `width` cells,
/// followed by the odometer readings of that trip.
/// Negative and NaN distances get no bar; their value is still printed.
pub fn render_bar_chart(series: &ChartSeries, unit: &str, width: usize, color: bool) -> String {
    let max = series
        .diffs
        .iter()
        .copied()
        .filter(|d| d.is_finite() && *d > 0.0)
        .fold(0.0_f64, f64::max);

    let label_w = series
        .dates
        .iter()
        .map(|d| UnicodeWidthStr::width(d.as_str()))
        .max()
        .unwrap_or(0);

    let mut out = format!("Travel distance ({unit})\n");

    for (i, (date, diff)) in series.dates.iter().zip(&series.diffs).enumerate() {
        let len = if max > 0.0 && diff.is_finite() && *diff > 0.0 {
            ((diff / max) * width as f64).round().max(1.0) as usize
        } else {
            0
        };

        let bar: String = std::iter::repeat_n(BAR, len).collect();
        let bar = if color { paint(&bar, CYAN) } else { bar };
        let fill = " ".repeat(label_w.saturating_sub(UnicodeWidthStr::width(date.as_str())));

        let sep = if len > 0 { " " } else { "" };
        let readings = reading(series.starts.get(i), series.stops.get(i));
        out.push_str(&format!(
            "{date}{fill} | {bar}{sep}{}  {readings}\n",
            format_number(*diff)
        ));
    }

    out
}

fn reading(start: Option<&f64>, stop: Option<&f64>) -> String {
    let show = |v: Option<&f64>| v.map_or_else(|| "NaN".to_string(), |n| format_number(*n));
    format!("[{} -> {}]", show(start), show(stop))
}
