pub mod engine;
pub mod tesseract;
pub mod token;

pub use engine::{OcrEngine, OcrError, OcrInput, OcrOutput};
pub use tesseract::{parse_tsv, TesseractEngine};
pub use token::{BoundingBox, OcrToken};
