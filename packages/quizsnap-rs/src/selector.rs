//! Ties classification, matching and clicking into one pass over a model response.
use log::{debug, error, info, warn};
use quizsnap_ocr::OcrToken;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::classifier::{classify, QuestionType};
use crate::clicker::{is_duplicate, jitter, resolve_target, ClickPoint, Pointer, PointerError};
use crate::config::{DelayRange, EnabledSink, NoPersistence, SelectorConfig, SettingsError};
use crate::error::SelectError;
use crate::matcher::{find_match, normalize_candidate};
use crate::screen::TokenSource;

/// What one call to [`AutoSelector::find_and_click_answers`] ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// The switch is off.
    Disabled,
    /// The answer can't be mapped to clicks (`match` or `unknown`).
    Skipped(QuestionType),
    /// The screen could not be read; nothing was clicked.
    ScanFailed {
        question_type: QuestionType,
        reason: String,
    },
    Completed(SelectionReport),
}

impl SelectionOutcome {
    pub fn clicks(&self) -> &[ClickPoint] {
        match self {
            SelectionOutcome::Completed(report) => &report.clicks,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionReport {
    pub question_type: QuestionType,
    pub answers: Vec<String>,
    /// Canonical positions clicked, in answer order.
    pub clicks: Vec<ClickPoint>,
    /// Answers that were not clicked: not found, duplicate, or pointer error.
    pub missed: Vec<String>,
}

/// Clicks the options a model picked.
///
/// Not meant to be shared: a pass borrows the selector mutably, so one
/// selector can never run two passes at once.
pub struct AutoSelector<P> {
    config: SelectorConfig,
    pointer: P,
    sink: Box<dyn EnabledSink>,
    rng: StdRng,
}

impl<P: Pointer> AutoSelector<P> {
    pub fn new(config: SelectorConfig, pointer: P) -> Self {
        Self {
            config,
            pointer,
            sink: Box::new(NoPersistence),
            rng: StdRng::from_entropy(),
        }
    }

    /// Mirrors every [`Self::set_enabled`] into `sink`.
    pub fn with_sink(mut self, sink: impl EnabledSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Makes jitter and pacing reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn pointer(&self) -> &P {
        &self.pointer
    }

    pub fn into_pointer(self) -> P {
        self.pointer
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Flips the switch, then persists it. The in-memory flag changes even if persisting fails.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), SettingsError> {
        self.config.enabled = enabled;
        info!("Auto-selector {}", if enabled { "enabled" } else { "disabled" });
        self.sink.store_enabled(enabled)
    }

    /// Classifies `response`, reads the screen once and clicks each answer in order.
    ///
    /// Only the pointer fail-safe is returned as an error; every other failure
    /// is logged and ends up in the outcome.
    pub async fn find_and_click_answers(
        &mut self,
        response: &str,
        screen: &dyn TokenSource,
    ) -> Result<SelectionOutcome, SelectError> {
        if !self.config.enabled {
            info!("Auto-selector is disabled, skipping automatic selection");
            return Ok(SelectionOutcome::Disabled);
        }

        let classification = classify(response);
        let question_type = classification.question_type;

        if question_type == QuestionType::Match {
            info!("MATCH questions are not supported for auto-selection");
            return Ok(SelectionOutcome::Skipped(question_type));
        }
        if !question_type.is_clickable() || classification.answers.is_empty() {
            warn!("Could not determine question type or no answers found");
            return Ok(SelectionOutcome::Skipped(question_type));
        }

        info!(
            "Detected {} question with {} answer(s)",
            question_type,
            classification.answers.len()
        );

        let tokens = match screen.screen_tokens().await {
            Ok(tokens) => tokens,
            Err(e) => {
                error!("OCR detection failed: {}", e);
                warn!("Auto-select requires visible text on screen");
                return Ok(SelectionOutcome::ScanFailed {
                    question_type,
                    reason: e.to_string(),
                });
            }
        };
        debug!("Screen scan produced {} tokens", tokens.len());

        let mut clicks: Vec<ClickPoint> = Vec::new();
        let mut missed = Vec::new();
        let total = classification.answers.len();

        for (i, answer) in classification.answers.iter().enumerate() {
            match self.click_answer(answer, &tokens, &clicks).await? {
                Some(point) => clicks.push(point),
                None => missed.push(answer.clone()),
            }
            if i + 1 < total {
                self.pause(self.config.pacing.between_answers).await;
            }
        }

        info!("Successfully selected {} answer(s)", clicks.len());

        Ok(SelectionOutcome::Completed(SelectionReport {
            question_type,
            answers: classification.answers,
            clicks,
            missed,
        }))
    }

    /// Locates one answer among `tokens` and clicks its control unless it is
    /// within the duplicate radius of a point in `clicked`.
    ///
    /// Returns the canonical (pre-jitter) point on success.
    pub async fn click_answer(
        &mut self,
        answer: &str,
        tokens: &[OcrToken],
        clicked: &[ClickPoint],
    ) -> Result<Option<ClickPoint>, SelectError> {
        let clean = normalize_candidate(answer);
        if clean.is_empty() {
            warn!("Answer '{}' is empty after cleanup", answer);
            return Ok(None);
        }
        info!("Searching for answer on screen: '{}'", clean);

        let Some(found) = find_match(&clean, tokens, self.config.acceptance_score) else {
            warn!("Could not locate answer '{}' on screen", clean);
            return Ok(None);
        };
        let Some(token) = tokens.get(found.token_index) else {
            error!("Match for '{}' points past the token list", clean);
            return Ok(None);
        };

        let target = resolve_target(token, self.config.click_offset_x);
        if is_duplicate(&target, clicked, self.config.duplicate_radius) {
            info!("Skipping duplicate click at ({}, {})", target.x, target.y);
            return Ok(None);
        }

        let aim = jitter(&target, self.config.jitter, &mut self.rng);
        let glide = self.config.pacing.move_duration.sample(&mut self.rng);

        if let Err(e) = self.pointer.move_to(aim.x, aim.y, glide) {
            return Self::pointer_failed(answer, e);
        }
        self.pause(self.config.pacing.before_click).await;
        if let Err(e) = self.pointer.click() {
            return Self::pointer_failed(answer, e);
        }

        info!(
            "Clicked radio button for answer at ({}, {}) with {:.1}% confidence",
            target.x, target.y, found.score
        );
        Ok(Some(target))
    }

    fn pointer_failed(answer: &str, e: PointerError) -> Result<Option<ClickPoint>, SelectError> {
        if e.is_fail_safe() {
            error!("Pointer fail-safe triggered - mouse moved to corner");
            return Err(SelectError::Aborted);
        }
        error!("Error in auto-select for '{}': {}", answer, e);
        Ok(None)
    }

    async fn pause(&mut self, range: DelayRange) {
        let delay = range.sample(&mut self.rng);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
