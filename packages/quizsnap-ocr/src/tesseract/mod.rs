mod engine;
mod process;
mod tsv;

pub use engine::TesseractEngine;
pub use tsv::parse_tsv;
