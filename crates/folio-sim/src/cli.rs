//! Command line

use clap::{Parser, Subcommand, ValueEnum};
use folio_core::LogFormat;
use folio_scene::Pointer;
use folio_theme::Theme;
use std::path::PathBuf;

/// Headless driver for the portfolio runtime
#[derive(Debug, Parser)]
#[command(name = "folio-sim", version, about)]
pub(crate) struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, env = folio_core::CONFIG_ENV)]
    pub(crate) config: Option<PathBuf>,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogStyle::Text)]
    pub(crate) log_format: LogStyle,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Animate the particle field for a number of frames
    Run(RunArgs),
    /// Flip the persisted dark-mode flag in a JSON store
    Toggle {
        /// Preference file; falls back to `[theme] store` from the config
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Scroll the demo page and print which sections are revealed
    Reveal {
        /// Viewport height in pixels
        #[arg(long, default_value_t = 800.0)]
        viewport_height: f32,
        /// Scroll offsets to visit, in order
        #[arg(long, num_args = 1.., default_values_t = [0.0, 900.0, 1800.0, 2700.0])]
        scroll: Vec<f32>,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RunArgs {
    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    pub(crate) frames: u64,
    /// Generation seed; overrides `[frame] seed`
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Theme to start in
    #[arg(long, value_enum)]
    pub(crate) theme: Option<ThemeArg>,
    /// Seconds per frame; defaults to the configured frame rate
    #[arg(long)]
    pub(crate) dt: Option<f32>,
    /// Normalized pointer as `x,y`
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) pointer: Option<Pointer>,
    /// Print the final report as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Pace frames in wall-clock time
    #[arg(long)]
    pub(crate) realtime: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogStyle {
    Text,
    Json,
}

impl From<LogStyle> for LogFormat {
    fn from(style: LogStyle) -> Self {
        match style {
            LogStyle::Text => LogFormat::Text,
            LogStyle::Json => LogFormat::Json,
        }
    }
}
