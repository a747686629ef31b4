//! Voice list widget - active ratios in insertion order

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratio_voices::engine::ActiveVoice;

pub fn render_voices(
    frame: &mut Frame,
    area: Rect,
    voices: &[ActiveVoice],
    selected: Option<usize>,
    base_freq: f32,
) {
    let block = Block::default()
        .title(" Voices [↑/↓ u/d x] ")
        .borders(Borders::ALL);

    if voices.is_empty() {
        let hint = Paragraph::new(" no voices, pick a ratio and press Enter")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let lines: Vec<Line> = voices
        .iter()
        .enumerate()
        .map(|(i, voice)| {
            let is_selected = selected == Some(i);
            let marker = if is_selected { "▶" } else { " " };
            let style = if is_selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(format!("{marker} {:>6} ", voice.ratio.to_string()), style),
                Span::styled(
                    format!("{:>8.2} Hz  ", voice.ratio.frequency(base_freq)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(voice.id.to_string(), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
