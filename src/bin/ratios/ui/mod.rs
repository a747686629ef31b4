//! TUI module for ratios
//!
//! Drives the engine from the keyboard, steps the waveform loop once per
//! frame and shows what the device is actually playing.

mod input;
mod palette;
mod spectrum;
mod transport;
mod voices;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use ratio_voices::{
    context::CpalContext,
    engine::{ActiveVoice, CommandOutcome, EnsembleCommand, VoiceEngine},
    error::EngineError,
    ratio::Ratio,
    scope::{CancelHandle, Point, RenderLoop},
};
use rtrb::Consumer;
use std::time::Duration;

use input::RatioInput;
use palette::{render_palette, PALETTE};
use spectrum::{render_spectrum, SpectrumAnalyzer};
use transport::{render_transport, AudioStats, TransportView};
use voices::render_voices;
use waveform::{chart_points, render_waveform};

/// Samples kept from the tap for the meters and spectrum
const VIS_BUFFER_SIZE: usize = 2048;
/// Base frequency step for +/-
const BASE_FREQ_STEP: f32 = 10.0;

pub struct UiApp {
    engine: VoiceEngine<CpalContext>,
    /// Mono copy of the device output
    audio_rx: Consumer<f32>,
    audio_buffer: Vec<f32>,
    /// Built once the device is open and its rate known
    analyzer: Option<SpectrumAnalyzer>,
    render_loop: RenderLoop,
    quit: CancelHandle,
    /// Waveform in chart coordinates
    wave_data: Vec<(f64, f64)>,
    palette_cursor: usize,
    selected: Option<usize>,
    /// Ratio being typed for the selected voice
    editing: Option<RatioInput>,
    status: Option<String>,
}

impl UiApp {
    pub fn new(
        engine: VoiceEngine<CpalContext>,
        audio_rx: Consumer<f32>,
        render_loop: RenderLoop,
    ) -> Self {
        let selected = engine.len().checked_sub(1);
        let quit = render_loop.cancel_handle();
        Self {
            engine,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            analyzer: None,
            render_loop,
            quit,
            wave_data: Vec::new(),
            palette_cursor: 0,
            selected,
            editing: None,
            status: None,
        }
    }

    /// Run until quit, then shut the engine down
    pub fn run(mut self, mut terminal: DefaultTerminal) -> EyreResult<()> {
        let res = self.event_loop(&mut terminal);
        self.engine.shutdown();
        res
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        loop {
            // Fire releases whose fade has finished
            self.engine.tick();

            self.poll_audio();

            let ratios = self.engine.active_ratios();
            let config = *self.render_loop.sampler().config();
            let wave_data = &mut self.wave_data;
            let running = self.render_loop.step(&ratios, &mut |points: &[Point]| {
                chart_points(points, &config, wave_data)
            });
            if !running {
                return Ok(());
            }

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
    }

    /// Drain the tap, keeping the last VIS_BUFFER_SIZE samples
    fn poll_audio(&mut self) {
        let mut fresh = false;
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
            fresh = true;
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }

        if self.analyzer.is_none() {
            if let Some(sample_rate) = self.engine.context().sample_rate() {
                self.analyzer = Some(SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate));
            }
        }
        if fresh {
            if let Some(analyzer) = self.analyzer.as_mut() {
                analyzer.update(&self.audio_buffer);
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.editing.is_some() {
            self.handle_edit_key(key);
            return;
        }
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit.cancel(),
            KeyCode::Left => {
                self.palette_cursor = (self.palette_cursor + PALETTE.len() - 1) % PALETTE.len();
            }
            KeyCode::Right => {
                self.palette_cursor = (self.palette_cursor + 1) % PALETTE.len();
            }
            KeyCode::Enter => {
                let ratio = PALETTE[self.palette_cursor].to_string();
                if let Some(CommandOutcome::Added(_)) =
                    self.apply(EnsembleCommand::SelectRatio(ratio))
                {
                    self.selected = self.engine.len().checked_sub(1);
                }
            }
            KeyCode::Up => {
                self.selected = self.selected.map(|i| i.saturating_sub(1));
            }
            KeyCode::Down => {
                let last = self.engine.len().saturating_sub(1);
                self.selected = self.selected.map(|i| (i + 1).min(last));
            }
            KeyCode::Char('u') => self.edit_selected(|r| r.octave_up()),
            KeyCode::Char('d') => self.edit_selected(|r| r.octave_down()),
            KeyCode::Char('e') => {
                if let Some(voice) = self.selected_voice() {
                    self.editing = Some(RatioInput::new(voice.id, voice.ratio));
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(voice) = self.selected_voice() {
                    self.apply(EnsembleCommand::RemoveVoice(voice.id));
                    self.selected = match self.engine.len() {
                        0 => None,
                        len => self.selected.map(|i| i.min(len - 1)),
                    };
                }
            }
            KeyCode::Char(' ') => {
                let command = if self.engine.is_playing() {
                    EnsembleCommand::Pause
                } else {
                    EnsembleCommand::Play
                };
                self.apply(command);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let hz = self.engine.base_frequency() + BASE_FREQ_STEP;
                self.apply(EnsembleCommand::SetBaseFrequency(hz));
            }
            KeyCode::Char('-') => {
                let hz = self.engine.base_frequency() - BASE_FREQ_STEP;
                self.apply(EnsembleCommand::SetBaseFrequency(hz));
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.editing = None,
            KeyCode::Enter => {
                if let Some(input) = self.editing.take() {
                    match input.command() {
                        Ok(command) => {
                            self.apply(command);
                        }
                        Err(e) => self.status = Some(EngineError::from(e).to_string()),
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(input) = self.editing.as_mut() {
                    input.backspace();
                }
            }
            KeyCode::Char(c) => {
                if let Some(input) = self.editing.as_mut() {
                    input.push(c);
                }
            }
            _ => {}
        }
    }

    fn selected_voice(&self) -> Option<ActiveVoice> {
        self.selected
            .and_then(|i| self.engine.voices().get(i))
            .copied()
    }

    fn edit_selected(&mut self, f: impl Fn(&Ratio) -> Ratio) {
        if let Some(voice) = self.selected_voice() {
            let ratio = f(&voice.ratio);
            self.apply(EnsembleCommand::EditRatio {
                id: voice.id,
                numerator: ratio.numerator(),
                denominator: ratio.denominator(),
            });
        }
    }

    /// Send a command, showing a rejection in the status line
    fn apply(&mut self, command: EnsembleCommand) -> Option<CommandOutcome> {
        match self.engine.handle(command) {
            Ok(outcome) => {
                self.status = None;
                Some(outcome)
            }
            Err(e) => {
                self.status = Some(e.to_string());
                None
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: transport, palette, voices | waveform, spectrum, help
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Transport bar
                Constraint::Length(3),  // Palette
                Constraint::Min(8),     // Voices | waveform
                Constraint::Length(10), // Spectrum
                Constraint::Length(1),  // Help / status
            ])
            .split(area);
        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(20)])
            .split(rows[2]);

        let view = TransportView {
            transport: self.engine.transport(),
            base_freq: self.engine.base_frequency(),
            voices: self.engine.len(),
            sample_rate: self.engine.context().sample_rate(),
            stats: AudioStats::from_buffer(&self.audio_buffer),
        };
        render_transport(frame, rows[0], &view);

        render_palette(frame, rows[1], self.palette_cursor);

        render_voices(
            frame,
            middle[0],
            self.engine.voices(),
            self.selected,
            self.engine.base_frequency(),
        );
        render_waveform(
            frame,
            middle[1],
            &self.wave_data,
            self.render_loop.sampler().config(),
        );

        if let Some(analyzer) = &self.analyzer {
            let base = self.engine.base_frequency();
            let markers: Vec<f32> = self
                .engine
                .voices()
                .iter()
                .map(|v| v.ratio.frequency(base))
                .collect();
            render_spectrum(frame, rows[3], analyzer, &markers);
        }

        let help = match (&self.editing, &self.status) {
            (Some(input), _) => Paragraph::new(format!(
                " Ratio for {}: {}_  [Enter] Apply  [Esc] Cancel",
                input.id(),
                input.text()
            ))
            .style(Style::default().fg(Color::Yellow)),
            (None, Some(message)) => Paragraph::new(format!(" {message}"))
                .style(Style::default().fg(Color::Red)),
            (None, None) => Paragraph::new(
                " [Q] Quit  [Space] Play/Pause  [+/-] Base freq  [U/D] Octave  [E] Edit ratio",
            )
            .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(help, rows[4]);
    }
}
