//! Ratios - application builder and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};

use ratio_voices::{
    context::CpalContext,
    engine::{EngineConfig, VoiceEngine},
    scope::{RenderLoop, WaveConfig},
};

use super::ui::UiApp;

/// Main application builder
pub struct Ratios {
    engine: EngineConfig,
    wave: WaveConfig,
    voices: Vec<String>,
    autoplay: bool,
}

impl Ratios {
    pub fn new() -> Self {
        Self {
            engine: EngineConfig::default(),
            wave: WaveConfig::default(),
            voices: Vec::new(),
            autoplay: false,
        }
    }

    pub fn engine(mut self, config: EngineConfig) -> Self {
        self.engine = config;
        self
    }

    pub fn wave(mut self, config: WaveConfig) -> Self {
        self.wave = config;
        self
    }

    /// Add a voice at start-up, as `"n/d"`
    pub fn voice(mut self, ratio: &str) -> Self {
        self.voices.push(ratio.to_string());
        self
    }

    pub fn autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let mut context = CpalContext::new();
        let tap = context
            .take_tap()
            .ok_or_else(|| eyre!("audio tap already taken"))?;
        let mut engine = VoiceEngine::new(context, self.engine);

        let base = engine.base_frequency();
        for ratio in &self.voices {
            engine
                .add_voice_str(ratio, base)
                .wrap_err_with(|| format!("failed to add voice {ratio}"))?;
        }
        if self.autoplay {
            engine.play().wrap_err("failed to start playback")?;
        }

        let terminal = ratatui::init();
        let res = UiApp::new(engine, tap, RenderLoop::new(self.wave)).run(terminal);
        ratatui::restore();
        res
    }
}

impl Default for Ratios {
    fn default() -> Self {
        Self::new()
    }
}
