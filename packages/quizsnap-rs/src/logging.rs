//! Logger installation for the `quizsnap` binary.
//!
//! The library only talks to the `log` facade; whoever embeds it decides
//! where records go.
use anyhow::{Context, Result};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::Path;

/// Installs `env_logger`. `RUST_LOG` wins over `verbose`; records go to
/// `log_file` (appended) when given, stderr otherwise.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let env = env_logger::Env::default().default_filter_or(default_level.as_str());
    let mut builder = env_logger::Builder::from_env(env);

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Logger already initialized")?;
    Ok(())
}
