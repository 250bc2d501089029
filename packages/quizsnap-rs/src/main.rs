mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Commands, ResponseArgs};
use quizsnap_rs::prelude::*;
use quizsnap_rs::logging;
use std::io::Read;
use std::path::{Path, PathBuf};

#[cfg(not(feature = "live"))]
const LIVE_UNAVAILABLE: &str = "--live needs quizsnap built with the `live` feature";

#[tokio::main]
async fn main() {
  let args = Args::parse();

  if let Err(e) = run(args).await {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
  }
}

async fn run(args: Args) -> Result<()> {
  match args.command {
    Commands::Version => {
      println!("quizsnap {}", env!("CARGO_PKG_VERSION"));
      Ok(())
    }
    Commands::Classify { response } => {
      logging::init(args.verbose, None)?;
      let text = read_response(&response)?;
      let result = classify(&text);
      println!("{}", result.question_type);
      for answer in &result.answers {
        println!("{}", answer);
      }
      Ok(())
    }
    Commands::Select {
      response,
      tokens,
      screenshot,
      live,
      settings,
      force,
      no_pacing,
    } => {
      let store = SettingsStore::new(&settings);
      let loaded = store.load()?;
      logging::init(args.verbose || loaded.debug_mode, loaded.log_file.as_deref())?;

      let mut config = SelectorConfig::from(&loaded);
      if force {
        config.enabled = true;
      }
      if no_pacing {
        config.pacing = Pacing::none();
      }

      let text = read_response(&response)?;
      let screen = open_screen(tokens, screenshot, live, &loaded.ocr_lang)?;
      let pointer = open_pointer(live)?;
      let mut selector = AutoSelector::new(config, pointer).with_sink(store);

      let outcome = selector.find_and_click_answers(&text, screen.as_ref()).await?;
      print_outcome(&outcome);
      Ok(())
    }
    Commands::AutoSelect { state, settings } => {
      logging::init(args.verbose, None)?;
      let store = SettingsStore::new(&settings);
      let loaded = store.load()?;
      let mut selector = AutoSelector::new(SelectorConfig::from(&loaded), DryRunPointer::new()).with_sink(store);
      selector.set_enabled(state.enabled())?;
      println!(
        "auto-select {} ({})",
        if selector.is_enabled() { "on" } else { "off" },
        settings.display()
      );
      Ok(())
    }
  }
}

fn open_screen(
  tokens: Option<PathBuf>,
  screenshot: Option<PathBuf>,
  live: bool,
  lang: &str,
) -> Result<Box<dyn TokenSource>> {
  if live {
    return live_screen(lang);
  }
  match (tokens, screenshot) {
    (Some(path), _) => Ok(Box::new(StaticTokens::from_json_file(&path)?)),
    (None, Some(path)) => Ok(Box::new(EngineTokens::new(
      TesseractEngine::new(lang),
      OcrInput::FilePath(path),
    ))),
    (None, None) => anyhow::bail!("one of --tokens, --screenshot or --live is required"),
  }
}

fn open_pointer(live: bool) -> Result<Box<dyn Pointer>> {
  if live {
    return live_pointer();
  }
  Ok(Box::new(DryRunPointer::new()))
}

#[cfg(feature = "live")]
fn live_screen(lang: &str) -> Result<Box<dyn TokenSource>> {
  Ok(Box::new(quizsnap_rs::LiveScreen::new(TesseractEngine::new(lang))))
}

#[cfg(not(feature = "live"))]
fn live_screen(_lang: &str) -> Result<Box<dyn TokenSource>> {
  anyhow::bail!(LIVE_UNAVAILABLE)
}

#[cfg(feature = "live")]
fn live_pointer() -> Result<Box<dyn Pointer>> {
  let pointer = quizsnap_rs::EnigoPointer::new().context("Failed to open the system pointer")?;
  Ok(Box::new(pointer))
}

#[cfg(not(feature = "live"))]
fn live_pointer() -> Result<Box<dyn Pointer>> {
  anyhow::bail!(LIVE_UNAVAILABLE)
}

fn read_response(args: &ResponseArgs) -> Result<String> {
  if let Some(text) = &args.text {
    return Ok(text.clone());
  }
  if let Some(path) = &args.response_file {
    return read_file(path);
  }
  let mut text = String::new();
  std::io::stdin()
    .read_to_string(&mut text)
    .context("Failed to read response from stdin")?;
  Ok(text)
}

fn read_file(path: &Path) -> Result<String> {
  std::fs::read_to_string(path).with_context(|| format!("Failed to read response file {}", path.display()))
}

fn print_outcome(outcome: &SelectionOutcome) {
  match outcome {
    SelectionOutcome::Disabled => println!("auto-select is off; nothing clicked"),
    SelectionOutcome::Skipped(question_type) => println!("{}: skipped", question_type),
    SelectionOutcome::ScanFailed { question_type, reason } => {
      println!("{}: screen scan failed: {}", question_type, reason)
    }
    SelectionOutcome::Completed(report) => {
      println!("{}", report.question_type);
      for point in &report.clicks {
        println!("clicked ({}, {})", point.x, point.y);
      }
      for answer in &report.missed {
        println!("missed {}", answer);
      }
      println!("selected {} of {} answer(s)", report.clicks.len(), report.answers.len());
    }
  }
}
