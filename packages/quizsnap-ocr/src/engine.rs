use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::token::OcrToken;

#[derive(Debug, Clone)]
pub enum OcrInput {
    FilePath(PathBuf),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct OcrOutput {
    pub text: String,
    pub tokens: Vec<OcrToken>,
}

impl OcrOutput {
    /// Builds the output from word tokens, joining the non-blank ones with spaces.
    pub fn from_tokens(tokens: Vec<OcrToken>) -> Self {
        let text = tokens
            .iter()
            .filter(|t| !t.is_blank())
            .map(|t| t.text.trim())
            .collect::<Vec<_>>()
            .join(" ");
        Self { text, tokens }
    }
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("engine error: {0}")]
    EngineError(String),
    #[error("malformed engine output at line {line}: {reason}")]
    MalformedOutput { line: usize, reason: String },
}

#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError>;
}
