use std::path::PathBuf;

use async_trait::async_trait;

use crate::engine::{OcrEngine, OcrError, OcrInput, OcrOutput};

use super::process;

/// OCR engine backed by the `tesseract` command line tool.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: PathBuf,
    lang: String,
}

impl TesseractEngine {
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            lang: lang.into(),
        }
    }

    /// Uses a tesseract binary outside of `PATH`.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new("eng")
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError> {
        let binary = self.binary.clone();
        let lang = self.lang.clone();
        let tokens = match input {
            OcrInput::FilePath(path) => {
                let path = path.clone();
                tokio::task::spawn_blocking(move || process::recognize_file(&binary, &lang, &path))
                    .await
                    .map_err(|e| OcrError::EngineError(e.to_string()))??
            }
            OcrInput::Bytes(data) => {
                let data = data.clone();
                tokio::task::spawn_blocking(move || process::recognize_bytes(&binary, &lang, &data))
                    .await
                    .map_err(|e| OcrError::EngineError(e.to_string()))??
            }
        };
        Ok(OcrOutput::from_tokens(tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_image_is_invalid_input() {
        let engine = TesseractEngine::default();
        let input = OcrInput::FilePath(PathBuf::from("/definitely/not/here.png"));
        let err = engine.recognize(&input).await.unwrap_err();
        assert!(matches!(err, OcrError::InvalidInput(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_missing_binary_is_engine_error() {
        let engine = TesseractEngine::new("eng").with_binary("/nonexistent/tesseract-bin");
        let input = OcrInput::Bytes(vec![0x89, b'P', b'N', b'G']);
        let err = engine.recognize(&input).await.unwrap_err();
        assert!(matches!(err, OcrError::EngineError(_)), "got {:?}", err);
    }
}
