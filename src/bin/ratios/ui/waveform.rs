//! Waveform widget - the sampled sum of sines

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use ratio_voices::scope::{Point, WaveConfig};

/// Convert sampler points (screen coordinates, y down) to chart data (y up)
pub fn chart_points(points: &[Point], config: &WaveConfig, out: &mut Vec<(f64, f64)>) {
    out.clear();
    out.extend(points.iter().map(|p| (p.x, config.height - p.y)));
}

/// Render the waveform
pub fn render_waveform(frame: &mut Frame, area: Rect, data: &[(f64, f64)], config: &WaveConfig) {
    let block = Block::default()
        .title(" Waveform ")
        .borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, config.width])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, config.height])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peaks_point_up_on_the_chart() {
        let config = WaveConfig::default();
        let mut out = Vec::new();
        chart_points(&[Point::new(50.0, 50.0)], &config, &mut out);
        assert_eq!(out, vec![(50.0, 150.0)]);
    }
}
