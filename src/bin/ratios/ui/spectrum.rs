//! Spectrum widget
//!
//! FFT of the real audio output on log-spaced bins, with the expected voice
//! frequencies marked on top.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::{f32::consts::TAU, sync::Arc};

const SPECTRUM_BINS: usize = 64;
const FLOOR_DB: f64 = -100.0;
const MIN_FREQ: f32 = 20.0;

pub struct SpectrumAnalyzer {
    sample_rate: f32,
    /// Hann window
    window: Vec<f32>,
    /// (frequency Hz, FFT index) per displayed bin
    bins: Vec<(f64, usize)>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (log10 frequency, dB)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(fft_len);

        let window: Vec<f32> = if fft_len > 1 {
            let denom = (fft_len - 1) as f32;
            (0..fft_len)
                .map(|i| 0.5 * (1.0 - (TAU * i as f32 / denom).cos()))
                .collect()
        } else {
            vec![1.0; fft_len]
        };

        let max_freq = (sample_rate / 2.0).min(20_000.0).max(MIN_FREQ * 2.0) as f64;
        let span = max_freq / MIN_FREQ as f64;
        let last_index = (fft_len / 2).max(1) - 1;
        let bins: Vec<(f64, usize)> = (0..SPECTRUM_BINS)
            .map(|i| {
                let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
                let freq = MIN_FREQ as f64 * span.powf(t);
                let index = (freq * fft_len as f64 / sample_rate as f64).round() as usize;
                (freq, index.min(last_index))
            })
            .collect();

        let spectrum = bins.iter().map(|&(f, _)| (f.log10(), FLOOR_DB)).collect();

        Self {
            sample_rate,
            window,
            bins,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            spectrum,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Analyze `buffer`; ignored unless it is exactly one FFT long.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for ((_, db), &(_, index)) in self.spectrum.iter_mut().zip(&self.bins) {
            let power = self.scratch[index].norm_sqr().max(1e-12);
            *db = (10.0 * (power as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }

    /// x-axis range, in log10 Hz
    pub fn bounds(&self) -> [f64; 2] {
        let first = self.bins.first().map_or(1.0, |&(f, _)| f.log10());
        let last = self.bins.last().map_or(4.0, |&(f, _)| f.log10());
        [first, last]
    }
}

/// Render the spectrum, marking `markers` (Hz) along the top
pub fn render_spectrum(frame: &mut Frame, area: Rect, analyzer: &SpectrumAnalyzer, markers: &[f32]) {
    let block = Block::default()
        .title(" Spectrum ")
        .borders(Borders::ALL);

    let spectrum = analyzer.data();
    let max_db = spectrum
        .iter()
        .map(|&(_, db)| db)
        .fold(FLOOR_DB, f64::max)
        .max(0.0)
        + 10.0;

    let marks: Vec<(f64, f64)> = markers
        .iter()
        .filter(|&&f| f > 0.0)
        .map(|&f| ((f as f64).log10(), max_db - 5.0))
        .collect();

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(spectrum),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&marks),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds(analyzer.bounds())
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, max_db])
                .labels(vec!["-100", "-60", "-20", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_peaks_near_its_frequency() {
        let sample_rate = 48_000.0;
        let len = 2048;
        let freq = 1_000.0;
        let buffer: Vec<f32> = (0..len)
            .map(|i| (TAU * freq * i as f32 / sample_rate).sin())
            .collect();

        let mut analyzer = SpectrumAnalyzer::new(len, sample_rate);
        analyzer.update(&buffer);

        let (peak_log_freq, _) = analyzer
            .data()
            .iter()
            .copied()
            .fold((0.0, f64::MIN), |best, p| if p.1 > best.1 { p } else { best });
        let peak_freq = 10f64.powf(peak_log_freq);
        assert!((peak_freq / 1_000.0 - 1.0).abs() < 0.1, "peak at {peak_freq} Hz");
    }

    #[test]
    fn wrong_length_is_ignored() {
        let mut analyzer = SpectrumAnalyzer::new(256, 48_000.0);
        analyzer.update(&[1.0; 100]);
        assert!(analyzer.data().iter().all(|&(_, db)| db == FLOOR_DB));
    }
}
