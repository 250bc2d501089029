use anyhow::Result;
use async_trait::async_trait;
use image::{imageops, DynamicImage, ImageFormat, Rgba, RgbaImage};
use log::debug;
use quizsnap_ocr::{OcrEngine, OcrError, OcrInput, OcrToken, TesseractEngine};
use std::io::Cursor;
use xcap::Monitor;

use crate::screen::{to_desktop, ScreenRect, TokenSource};

/// PNG of every monitor composited at its desktop position.
pub struct DesktopCapture {
    /// Desktop area covered by the canvas; its origin maps to canvas pixel (0, 0).
    pub bounds: ScreenRect,
    pub png: Vec<u8>,
}

fn grab_all_monitors() -> Result<DesktopCapture> {
    let monitors = Monitor::all()?;

    let mut shots = Vec::with_capacity(monitors.len());
    for monitor in &monitors {
        let rect = ScreenRect {
            x: monitor.x()?,
            y: monitor.y()?,
            width: monitor.width()?,
            height: monitor.height()?,
        };
        shots.push((rect, monitor.capture_image()?));
    }

    let rects: Vec<ScreenRect> = shots.iter().map(|(rect, _)| *rect).collect();
    let Some(bounds) = ScreenRect::union(&rects) else {
        anyhow::bail!("No monitors detected");
    };

    let mut canvas = RgbaImage::from_pixel(bounds.width, bounds.height, Rgba([0, 0, 0, 255]));
    for (rect, shot) in &shots {
        let x = i64::from(rect.x) - i64::from(bounds.x);
        let y = i64::from(rect.y) - i64::from(bounds.y);
        imageops::overlay(&mut canvas, shot, x, y);
    }

    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(canvas).write_to(&mut png, ImageFormat::Png)?;
    Ok(DesktopCapture {
        bounds,
        png: png.into_inner(),
    })
}

/// Captures every monitor on a blocking task.
pub async fn capture_desktop() -> Result<DesktopCapture, OcrError> {
    tokio::task::spawn_blocking(grab_all_monitors)
        .await
        .map_err(|e| OcrError::EngineError(format!("capture task failed: {}", e)))?
        .map_err(|e| OcrError::EngineError(format!("screen capture failed: {:#}", e)))
}

/// Captures the whole desktop and reads it with an OCR engine on every pass.
pub struct LiveScreen<E = TesseractEngine> {
    engine: E,
}

impl<E: OcrEngine> LiveScreen<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl<E: OcrEngine> TokenSource for LiveScreen<E> {
    async fn screen_tokens(&self) -> Result<Vec<OcrToken>, OcrError> {
        let capture = capture_desktop().await?;
        debug!(
            "Captured {}x{} desktop at ({}, {})",
            capture.bounds.width, capture.bounds.height, capture.bounds.x, capture.bounds.y
        );
        let output = self.engine.recognize(&OcrInput::Bytes(capture.png)).await?;
        debug!("Screen text: {}", output.text);
        Ok(to_desktop(output.tokens, (capture.bounds.x, capture.bounds.y)))
    }
}
