/*
    Wave sampler
    ============

    Draws the ensemble the way it would look if each voice were a pure sine
    and they were summed. This is a picture, not the audio: display
    frequencies are `display_scale × n/d`, so 1/1 is four cycles across the
    view regardless of the base frequency.

        y
        ▲
        │   ╭╮    ╭╮    ╭╮    ╭╮
    cy ─┼──╯──╰──╯──╰──╯──╰──╯──╰──   centerY = height / 2
        │        ╰╯    ╰╯    ╰╯
        └──────────────────────────▶ x
        0                        width

    For i in 0..=segments:

        x   = width · i / segments
        sum = Σ_v sin(f_v · 2π · i / segments + time · f_v)
        y   = centerY − sum · amplitude / count      (normalised)
        y   = centerY − sum · amplitude              (otherwise)

    Screen coordinates: y grows downwards, so positive sums sit above centre.

    With no voices the result is a flat line: two points, (0, cy) and (width, cy).
*/

use std::f64::consts::TAU;

use crate::ratio::Ratio;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Geometry and pacing of the waveform view.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveConfig {
    pub width: f64,
    pub height: f64,
    /// Peak displacement of one voice, in the same units as `height`.
    pub amplitude: f64,
    /// Cycles across the view for ratio 1/1.
    pub display_scale: f64,
    pub segments: usize,
    /// Time added per frame.
    pub time_step: f64,
    /// Divide the sum by the voice count so the trace stays in bounds.
    pub normalize_by_count: bool,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 200.0,
            amplitude: 50.0,
            display_scale: 4.0,
            segments: 800,
            time_step: 0.05,
            normalize_by_count: true,
        }
    }
}

impl WaveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn display_scale(mut self, scale: f64) -> Self {
        self.display_scale = scale;
        self
    }

    pub fn segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    pub fn time_step(mut self, step: f64) -> Self {
        self.time_step = step;
        self
    }

    pub fn normalize_by_count(mut self, normalize: bool) -> Self {
        self.normalize_by_count = normalize;
        self
    }

    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }
}

/// Sample the summed waveform of `ratios` at `time`.
pub fn sample(time: f64, ratios: &[Ratio], config: &WaveConfig) -> Vec<Point> {
    let mut points = Vec::new();
    sample_into(&mut points, time, ratios, config);
    points
}

/// [`sample`] into an existing buffer, reusing its allocation.
pub fn sample_into(points: &mut Vec<Point>, time: f64, ratios: &[Ratio], config: &WaveConfig) {
    points.clear();
    let center_y = config.center_y();

    if ratios.is_empty() {
        points.push(Point::new(0.0, center_y));
        points.push(Point::new(config.width, center_y));
        return;
    }

    let segments = config.segments.max(1);
    let frequencies: Vec<f64> = ratios
        .iter()
        .map(|r| config.display_scale * r.numerator() as f64 / r.denominator() as f64)
        .collect();
    let scale = if config.normalize_by_count {
        config.amplitude / ratios.len() as f64
    } else {
        config.amplitude
    };

    points.reserve(segments + 1);
    for i in 0..=segments {
        let position = i as f64 / segments as f64;
        let sum: f64 = frequencies
            .iter()
            .map(|&f| (f * TAU * position + time * f).sin())
            .sum();
        points.push(Point::new(config.width * position, center_y - sum * scale));
    }
}

/// Time accumulator plus a point buffer regenerated on demand.
#[derive(Debug, Clone)]
pub struct WaveSampler {
    config: WaveConfig,
    time: f64,
    points: Vec<Point>,
}

impl WaveSampler {
    pub fn new(config: WaveConfig) -> Self {
        Self {
            config,
            time: 0.0,
            points: Vec::with_capacity(config.segments.max(1) + 1),
        }
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Points from the last [`frame`](Self::frame).
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Regenerate the points for `ratios` at the current time.
    pub fn frame(&mut self, ratios: &[Ratio]) -> &[Point] {
        sample_into(&mut self.points, self.time, ratios, &self.config);
        &self.points
    }

    pub fn advance(&mut self) {
        self.time += self.config.time_step;
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
        self.points.clear();
    }
}

impl Default for WaveSampler {
    fn default() -> Self {
        Self::new(WaveConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ratios(list: &[&str]) -> Vec<Ratio> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn no_voices_is_a_flat_centre_line() {
        let points = sample(3.7, &[], &WaveConfig::default());
        assert_eq!(points, vec![Point::new(0.0, 100.0), Point::new(800.0, 100.0)]);
    }

    #[test]
    fn unison_is_one_sine_at_display_frequency() {
        let config = WaveConfig::default();
        let points = sample(0.0, &ratios(&["1/1"]), &config);
        assert_eq!(points.len(), 801);
        assert_abs_diff_eq!(points[0].x, 0.0);
        assert_abs_diff_eq!(points[800].x, 800.0);

        // Four cycles over 800 px: first peak (screen-up) at x = 50
        assert_abs_diff_eq!(points[50].y, 100.0 - 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(points[150].y, 100.0 + 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(points[200].y, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn time_shifts_the_phase() {
        let config = WaveConfig::default();
        let t = std::f64::consts::FRAC_PI_8; // time · 4 = π/2
        let points = sample(t, &ratios(&["1/1"]), &config);
        assert_abs_diff_eq!(points[0].y, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn normalised_sum_stays_within_amplitude() {
        let config = WaveConfig::default();
        let points = sample(1.3, &ratios(&["1/1", "3/2", "5/4", "7/4"]), &config);
        for p in &points {
            assert!((p.y - 100.0).abs() <= 50.0 + 1e-9, "y {}", p.y);
        }
    }

    #[test]
    fn unnormalised_sum_doubles_identical_voices() {
        let config = WaveConfig::default().normalize_by_count(false);
        let points = sample(0.0, &ratios(&["1/1", "2/2"]), &config);
        assert_abs_diff_eq!(points[50].y, 100.0 - 100.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_segments_is_treated_as_one() {
        let config = WaveConfig::default().segments(0);
        let points = sample(0.0, &ratios(&["1/1"]), &config);
        assert_eq!(points.len(), 2);
        assert_abs_diff_eq!(points[1].x, 800.0);
    }

    #[test]
    fn sampler_regenerates_only_on_frame() {
        let mut sampler = WaveSampler::default();
        assert!(sampler.points().is_empty());

        sampler.frame(&ratios(&["3/2"]));
        assert_eq!(sampler.points().len(), 801);
        sampler.advance();
        assert_abs_diff_eq!(sampler.time(), 0.05);
        assert_eq!(sampler.points().len(), 801, "advance leaves points alone");

        assert_eq!(sampler.frame(&[]).len(), 2);
    }
}
