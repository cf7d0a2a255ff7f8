//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use llm_pricing::{Config, ConfigColorMode};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ConfigColorMode> for ColorMode {
    fn from(mode: ConfigColorMode) -> Self {
        match mode {
            ConfigColorMode::Auto => ColorMode::Auto,
            ConfigColorMode::Always => ColorMode::Always,
            ConfigColorMode::Never => ColorMode::Never,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "llm-pricing")]
#[command(
    about = "Cost breakdowns for OpenAI, Gemini and speech-to-text API usage",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Read configuration from FILE instead of the default locations
    #[arg(long, global = true, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug output (table lookups, loaded files)
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.debug && config.debug {
            self.debug = true;
        }

        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = color.into();
        }

        if let Commands::Price(args) = &mut self.command {
            if args.decimals.is_none() {
                args.decimals = config.decimals;
            }
            if args.tier.is_none() {
                args.tier = config.tier;
            }
            if args.stt_model.is_none() {
                args.stt_model = config.stt_model.clone();
            }
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}
