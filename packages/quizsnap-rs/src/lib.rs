//! # quizsnap-rs
//!
//! Grounds a language model's answer to a quiz question on the screen and
//! clicks it.
//!
//! ## Pipeline
//!
//! - **Classification**: [`classify`] reads the raw model response and decides
//!   whether it names one option, several options, a true/false verdict, a
//!   pairing (never clicked) or nothing usable.
//! - **Matching**: [`find_match`] searches one full-screen OCR pass for each
//!   answer using exact-word, exact-phrase and word-overlap scoring over a
//!   sliding window of tokens.
//! - **Clicking**: [`AutoSelector`] turns each accepted match into the
//!   position of the radio button or checkbox left of the label, suppresses
//!   repeats of an already clicked control, and drives a [`Pointer`] with
//!   small random offsets and pauses.
//!
//! With the `live` feature, `live::EnigoPointer` drives the real cursor and
//! `live::LiveScreen` captures every monitor for OCR.
//!
//! The pointer fail-safe ([`PointerError::FailSafe`]) is the only failure
//! that escapes a selection pass.
//!
//! ## Quick Start
//!
//! ```ignore
//! use quizsnap_rs::prelude::*;
//!
//! let config = SelectorConfig { enabled: true, ..SelectorConfig::default() };
//! let mut selector = AutoSelector::new(config, DryRunPointer::new());
//! let screen = StaticTokens::from_json_file("tokens.json")?;
//!
//! let outcome = selector.find_and_click_answers("- Paris\n- London", &screen).await?;
//! println!("clicked {} option(s)", outcome.clicks().len());
//! ```

pub mod classifier;
pub mod clicker;
pub mod config;
pub mod error;
#[cfg(feature = "live")]
pub mod live;
pub mod logging;
pub mod matcher;
pub mod screen;
pub mod selector;

pub use classifier::{classify, Classification, QuestionType};
pub use clicker::{
  is_duplicate, is_fail_safe_corner, jitter, resolve_target, ClickPoint, DryRunPointer, Pointer, PointerAction, PointerError,
};
pub use config::{
  DelayRange, EnabledSink, NoPersistence, Pacing, SelectorConfig, Settings, SettingsError, SettingsStore,
};
pub use error::SelectError;
pub use matcher::{best_match, find_match, normalize_candidate, MatchResult, MatchStrategy};
pub use screen::{to_desktop, EngineTokens, ScreenRect, StaticTokens, TokenSource};
pub use selector::{AutoSelector, SelectionOutcome, SelectionReport};

pub use quizsnap_ocr::{BoundingBox, OcrEngine, OcrError, OcrInput, OcrToken, TesseractEngine};

#[cfg(feature = "live")]
pub use live::{EnigoPointer, LiveScreen};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```ignore
/// use quizsnap_rs::prelude::*;
/// ```
pub mod prelude {
  pub use crate::{
    best_match, classify, find_match, normalize_candidate, AutoSelector, BoundingBox, Classification, ClickPoint,
    DryRunPointer, EngineTokens, MatchResult, MatchStrategy, OcrInput, OcrToken, Pacing, Pointer, PointerError,
    QuestionType, SelectError, SelectionOutcome, SelectionReport, SelectorConfig, Settings, SettingsStore,
    StaticTokens, TesseractEngine, TokenSource,
  };
}
