//! Real desktop backends: an OS cursor driven through `enigo` and an
//! all-monitor screen capture read by Tesseract.
mod capture;
mod pointer;

pub use capture::{capture_desktop, DesktopCapture, LiveScreen};
pub use pointer::EnigoPointer;
