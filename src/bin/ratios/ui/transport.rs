//! Transport bar widget - shows base frequency, play state, voices and levels

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratio_voices::{
    dsp::mix::{peak, rms},
    engine::Transport,
};

/// Audio levels for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        Self {
            peak: peak(buffer),
            rms: rms(buffer),
        }
    }
}

/// Everything the bar shows
pub struct TransportView {
    pub transport: Transport,
    pub base_freq: f32,
    pub voices: usize,
    pub sample_rate: Option<f32>,
    pub stats: AudioStats,
}

pub fn render_transport(frame: &mut Frame, area: Rect, view: &TransportView) {
    let block = Block::default()
        .title(" ratios ")
        .borders(Borders::ALL);

    let (symbol, label, color) = match view.transport {
        Transport::Playing => ("▶", "Playing", Color::Green),
        Transport::Paused => ("⏸", "Paused", Color::Yellow),
        Transport::Stopped => ("■", "Stopped", Color::DarkGray),
    };

    let rate = view
        .sample_rate
        .map_or_else(|| "--".to_string(), |sr| format!("{:.1}kHz", sr / 1000.0));

    let line = Line::from(vec![
        Span::styled(
            format!(" Base: {:.1} Hz  ", view.base_freq),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("{symbol} {label}  "), Style::default().fg(color)),
        Span::styled(
            format!("Voices: {}  ", view.voices),
            Style::default().fg(Color::White),
        ),
        Span::styled(format!("{rate}  "), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", view.stats.peak, view.stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
