//! ratios - harmonic ratio voices in the terminal
//!
//! Run with: cargo run -- --voice 1/1 --voice 3/2 --autoplay

mod app;
mod ui;

use app::Ratios;
use clap::Parser;
use color_eyre::eyre::{ensure, WrapErr};
use env_logger::{Env, Target};
use ratio_voices::{engine::EngineConfig, scope::WaveConfig};
use std::{
    fs::File,
    path::{Path, PathBuf},
};

/// Sine voices tuned to whole-number ratios of a base frequency.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Base frequency in Hz
    #[arg(long, default_value_t = 220.0)]
    base_freq: f32,

    /// Gain of each audible voice
    #[arg(long, default_value_t = 0.15)]
    gain: f32,

    /// Line segments in the waveform view
    #[arg(long, default_value_t = 800)]
    segments: usize,

    /// Do not divide the waveform by the number of voices
    #[arg(long)]
    no_normalize: bool,

    /// Voice to start with, as n/d (repeatable)
    #[arg(long = "voice", value_name = "RATIO")]
    voices: Vec<String>,

    /// Start playing immediately
    #[arg(long)]
    autoplay: bool,

    /// Write logs here (RUST_LOG filters, default info)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Logger writing to `path`. Nothing is logged without one: the terminal
/// belongs to the TUI.
fn file_logger(path: Option<&Path>) -> color_eyre::Result<Option<env_logger::Builder>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let file = File::create(path)
        .wrap_err_with(|| format!("cannot create log file {}", path.display()))?;
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(Target::Pipe(Box::new(file)));
    Ok(Some(builder))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    if let Some(mut logger) = file_logger(args.log_file.as_deref())? {
        logger.init();
    }
    ensure!(
        args.base_freq.is_finite() && args.base_freq > 0.0,
        "base frequency must be positive, got {}",
        args.base_freq
    );

    let engine = EngineConfig::new()
        .nominal_gain(args.gain)
        .base_frequency(args.base_freq);
    let wave = WaveConfig::new()
        .segments(args.segments)
        .normalize_by_count(!args.no_normalize);

    args.voices
        .iter()
        .fold(Ratios::new().engine(engine).wave(wave), |app, ratio| app.voice(ratio))
        .autoplay(args.autoplay)
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, LevelFilter, Log, Record};
    use std::fs;

    #[test]
    fn no_log_file_installs_no_logger() {
        assert!(file_logger(None).unwrap().is_none());
    }

    #[test]
    fn records_land_in_the_log_file() {
        let path = std::env::temp_dir().join(format!("ratios-{}.log", std::process::id()));
        let mut builder = file_logger(Some(&path)).unwrap().unwrap();
        let logger = builder.filter_level(LevelFilter::Trace).build();

        logger.log(
            &Record::builder()
                .args(format_args!("command rejected"))
                .level(Level::Warn)
                .target("ratios")
                .build(),
        );
        logger.flush();

        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(text.contains("command rejected"), "log file held {text:?}");
    }
}
