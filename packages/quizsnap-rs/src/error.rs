use thiserror::Error;

/// Failures that escape [`crate::AutoSelector::find_and_click_answers`].
///
/// Everything else (OCR failures, answers not found, pointer hiccups) is
/// logged and reported through [`crate::SelectionOutcome`] instead.
#[derive(Debug, Error)]
pub enum SelectError {
    /// The pointer fail-safe fired. The caller must stop automating.
    #[error("auto-selection aborted: pointer fail-safe triggered")]
    Aborted,
}
