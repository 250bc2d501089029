//! Where the OCR tokens of the current screen come from.
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use quizsnap_ocr::{OcrEngine, OcrError, OcrInput, OcrToken};
use std::path::Path;

/// One full-screen OCR pass.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn screen_tokens(&self) -> Result<Vec<OcrToken>, OcrError>;
}

/// Position and size of a monitor on the virtual desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRect {
    /// Smallest rectangle covering all `rects`. Monitors left of or above the
    /// primary one give it a negative origin.
    pub fn union(rects: &[ScreenRect]) -> Option<ScreenRect> {
        let left = rects.iter().map(|r| i64::from(r.x)).min()?;
        let top = rects.iter().map(|r| i64::from(r.y)).min()?;
        let right = rects.iter().map(|r| i64::from(r.x) + i64::from(r.width)).max()?;
        let bottom = rects.iter().map(|r| i64::from(r.y) + i64::from(r.height)).max()?;
        Some(ScreenRect {
            x: i32::try_from(left).ok()?,
            y: i32::try_from(top).ok()?,
            width: u32::try_from(right - left).ok()?,
            height: u32::try_from(bottom - top).ok()?,
        })
    }
}

/// Moves tokens recognized on a capture canvas whose top-left pixel sits at
/// `origin` into desktop coordinates.
pub fn to_desktop(tokens: Vec<OcrToken>, origin: (i32, i32)) -> Vec<OcrToken> {
    tokens
        .into_iter()
        .map(|token| OcrToken {
            bounding_box: token.bounding_box.translate(origin.0, origin.1),
            ..token
        })
        .collect()
}

/// A fixed, previously recorded token set.
#[derive(Debug, Clone, Default)]
pub struct StaticTokens {
    tokens: Vec<OcrToken>,
}

impl StaticTokens {
    pub fn new(tokens: Vec<OcrToken>) -> Self {
        Self { tokens }
    }

    /// Reads a JSON array of tokens (`text`, `left`, `top`, `width`, `height`).
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read token file {}", path.as_ref().display()))?;
        let tokens: Vec<OcrToken> =
            serde_json::from_str(&contents).context("Failed to parse token JSON")?;
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[OcrToken] {
        &self.tokens
    }
}

#[async_trait]
impl TokenSource for StaticTokens {
    async fn screen_tokens(&self) -> Result<Vec<OcrToken>, OcrError> {
        Ok(self.tokens.clone())
    }
}

/// Runs an OCR engine over a captured screen image.
pub struct EngineTokens<E> {
    engine: E,
    input: OcrInput,
}

impl<E: OcrEngine> EngineTokens<E> {
    pub fn new(engine: E, input: OcrInput) -> Self {
        Self { engine, input }
    }
}

#[async_trait]
impl<E: OcrEngine> TokenSource for EngineTokens<E> {
    async fn screen_tokens(&self) -> Result<Vec<OcrToken>, OcrError> {
        let output = self.engine.recognize(&self.input).await?;
        debug!("Screen text: {}", output.text);
        Ok(output.tokens)
    }
}
