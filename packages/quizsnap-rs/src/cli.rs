//! Command line arguments backing the `quizsnap` binary.
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use quizsnap_rs::config::DEFAULT_SETTINGS_FILE;

#[derive(Parser, Debug)]
#[command(
  name = "quizsnap",
  about = "Classifies a model's quiz answer and clicks the matching option on screen",
  version
)]
pub struct Args {
  /// Log scoring details
  #[arg(long, short = 'v', global = true)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Commands,
}

/// Where the model response is read from. Falls back to stdin.
#[derive(ClapArgs, Debug)]
pub struct ResponseArgs {
  /// Response text
  #[arg(conflicts_with = "response_file")]
  pub text: Option<String>,

  /// File holding the response text
  #[arg(long, short = 'f')]
  pub response_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Show how a response is classified and which answers would be searched for
  Classify {
    #[command(flatten)]
    response: ResponseArgs,
  },
  /// Locate the answers on screen and click them (dry-run pointer unless --live)
  Select {
    #[command(flatten)]
    response: ResponseArgs,

    /// JSON array of OCR tokens
    #[arg(
      long,
      short = 't',
      conflicts_with_all = ["screenshot", "live"],
      required_unless_present_any = ["screenshot", "live"]
    )]
    tokens: Option<PathBuf>,

    /// Screenshot to run through tesseract
    #[arg(long, short = 's', conflicts_with = "live")]
    screenshot: Option<PathBuf>,

    /// Capture all monitors and click with the real cursor (needs the `live` feature)
    #[arg(long)]
    live: bool,

    /// Settings file
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Run even when auto-select is switched off in the settings
    #[arg(long)]
    force: bool,

    /// Skip the randomized pauses
    #[arg(long)]
    no_pacing: bool,
  },
  /// Switch automatic selection on or off
  AutoSelect {
    state: Toggle,

    /// Settings file
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,
  },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
  On,
  Off,
}

impl Toggle {
  pub fn enabled(self) -> bool {
    self == Toggle::On
  }
}
