//! Ratio palette - the ratios on offer, grouped by denominator

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Harmonics first, then each denominator's new intervals up to the octave.
pub const PALETTE: [&str; 23] = [
    "1/1", "2/1", "3/1", "5/1", // first order
    "3/2", // second
    "4/3", "5/3", // third
    "5/4", "7/4", // fourth
    "6/5", "7/5", "8/5", "9/5", // fifth
    "9/8", "11/8", "13/8", "15/8", // eighth
    "10/9", "11/9", "13/9", "14/9", "16/9", "17/9", // ninth
];

/// Render the palette with the cursor highlighted
pub fn render_palette(frame: &mut Frame, area: Rect, cursor: usize) {
    let block = Block::default()
        .title(" Ratios [←/→ Enter] ")
        .borders(Borders::ALL);

    let spans: Vec<Span> = PALETTE
        .iter()
        .enumerate()
        .flat_map(|(i, ratio)| {
            let style = if i == cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };
            [Span::styled(format!(" {ratio} "), style), Span::raw(" ")]
        })
        .collect();

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratio_voices::ratio::Ratio;

    #[test]
    fn every_entry_is_in_lowest_terms() {
        for entry in PALETTE {
            let ratio: Ratio = entry.parse().unwrap();
            assert_eq!(ratio.to_string(), entry);
        }
    }
}
