use crate::engine::OcrError;
use crate::token::{BoundingBox, OcrToken};

const WORD_LEVEL: u32 = 5;
const COLUMNS: usize = 12;

/// Parses the word-level TSV report produced by `tesseract ... tsv`.
///
/// Only word rows (level 5) become tokens. Rows with empty text are kept so
/// token indices line up with the engine's own numbering; consumers skip them.
pub fn parse_tsv(report: &str) -> Result<Vec<OcrToken>, OcrError> {
    let mut tokens = Vec::new();

    for (idx, line) in report.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() || line.starts_with("level") {
            continue;
        }

        let fields: Vec<&str> = line.splitn(COLUMNS, '\t').collect();
        if fields.len() < COLUMNS - 1 {
            return Err(OcrError::MalformedOutput {
                line: line_no,
                reason: format!("expected {} columns, found {}", COLUMNS, fields.len()),
            });
        }

        let level: u32 = parse_field(fields[0], "level", line_no)?;
        if level != WORD_LEVEL {
            continue;
        }

        let bounding_box = BoundingBox {
            left: parse_field(fields[6], "left", line_no)?,
            top: parse_field(fields[7], "top", line_no)?,
            width: parse_field(fields[8], "width", line_no)?,
            height: parse_field(fields[9], "height", line_no)?,
        };
        let conf: f32 = parse_field(fields[10], "conf", line_no)?;
        let text = fields.get(11).copied().unwrap_or_default();

        tokens.push(OcrToken {
            text: text.to_string(),
            bounding_box,
            confidence: (conf >= 0.0).then_some(conf),
        });
    }

    Ok(tokens)
}

fn parse_field<T: std::str::FromStr>(raw: &str, name: &str, line: usize) -> Result<T, OcrError> {
    raw.trim().parse().map_err(|_| OcrError::MalformedOutput {
        line,
        reason: format!("invalid {} value {:?}", name, raw),
    })
}
