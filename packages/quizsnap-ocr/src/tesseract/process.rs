use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::engine::OcrError;
use crate::token::OcrToken;

use super::tsv::parse_tsv;

fn base_command(binary: &Path, lang: &str, input: &str) -> Command {
    let mut cmd = Command::new(binary);
    cmd.arg(input)
        .arg("stdout")
        .arg("-l")
        .arg(lang)
        .arg("tsv")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

fn finish(output: std::process::Output) -> Result<Vec<OcrToken>, OcrError> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(OcrError::EngineError(format!(
            "tesseract exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    let report = String::from_utf8_lossy(&output.stdout);
    parse_tsv(&report)
}

pub fn recognize_file(binary: &Path, lang: &str, path: &Path) -> Result<Vec<OcrToken>, OcrError> {
    if !path.exists() {
        return Err(OcrError::InvalidInput(format!(
            "image not found: {}",
            path.display()
        )));
    }
    let path_str = path
        .to_str()
        .ok_or_else(|| OcrError::InvalidInput("non-utf8 path".into()))?;

    let output = base_command(binary, lang, path_str)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| OcrError::EngineError(format!("failed to run tesseract: {}", e)))?;
    finish(output)
}

pub fn recognize_bytes(binary: &Path, lang: &str, data: &[u8]) -> Result<Vec<OcrToken>, OcrError> {
    if data.is_empty() {
        return Err(OcrError::InvalidInput("empty image buffer".into()));
    }

    let mut child = base_command(binary, lang, "stdin")
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| OcrError::EngineError(format!("failed to run tesseract: {}", e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(data)
            .map_err(|e| OcrError::EngineError(format!("failed to feed image: {}", e)))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| OcrError::EngineError(e.to_string()))?;
    finish(output)
}
