//! Screen-coordinate side of answer selection: where to click, whether that
//! spot was already clicked, and the pointer primitives that do the clicking.
use log::info;
use quizsnap_ocr::OcrToken;
use rand::Rng;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Horizontal distance from the start of an option's label back to its radio/checkbox.
pub const DEFAULT_CLICK_OFFSET_X: i32 = 30;
/// Two targets closer than this on both axes are the same control.
pub const DEFAULT_DUPLICATE_RADIUS: i32 = 20;
pub const DEFAULT_JITTER: u16 = 3;

/// Canonical (pre-jitter) position of a click, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClickPoint {
    pub x: i32,
    pub y: i32,
}

impl ClickPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_near(&self, other: &ClickPoint, radius: i32) -> bool {
        let near = |a: i32, b: i32| (i64::from(a) - i64::from(b)).abs() <= i64::from(radius);
        near(self.x, other.x) && near(self.y, other.y)
    }
}

/// The control sits to the left of its label, vertically centred on it.
pub fn resolve_target(token: &OcrToken, offset_x: i32) -> ClickPoint {
    let bbox = &token.bounding_box;
    ClickPoint::new(bbox.left.saturating_sub(offset_x), bbox.center_y())
}

pub fn is_duplicate(point: &ClickPoint, clicked: &[ClickPoint], radius: i32) -> bool {
    clicked.iter().any(|prev| point.is_near(prev, radius))
}

/// Shifts `point` by an independent offset in `-amount..=amount` on each axis.
pub fn jitter<R: Rng>(point: &ClickPoint, amount: u16, rng: &mut R) -> ClickPoint {
    let amount = i32::from(amount);
    ClickPoint::new(
        point.x.saturating_add(rng.gen_range(-amount..=amount)),
        point.y.saturating_add(rng.gen_range(-amount..=amount)),
    )
}

/// Whether `position` is one of the four corner pixels of a `(width, height)` display.
///
/// Parking the cursor there is the user's way of stopping the automation.
pub fn is_fail_safe_corner(position: (i32, i32), display: (i32, i32)) -> bool {
    let (x, y) = position;
    let (width, height) = display;
    let edge_x = [0, width.saturating_sub(1)];
    let edge_y = [0, height.saturating_sub(1)];
    edge_x.contains(&x) && edge_y.contains(&y)
}

#[derive(Debug, Error)]
pub enum PointerError {
    /// The user slammed the cursor into a fail-safe corner. Stops all automation.
    #[error("pointer fail-safe triggered: cursor moved to a screen corner")]
    FailSafe,
    #[error("pointer backend error: {0}")]
    Backend(String),
}

impl PointerError {
    pub fn is_fail_safe(&self) -> bool {
        matches!(self, PointerError::FailSafe)
    }
}

/// Blocking absolute-coordinate pointer control.
pub trait Pointer: Send {
    /// Glides the cursor to `(x, y)` over `duration`.
    fn move_to(&mut self, x: i32, y: i32, duration: Duration) -> Result<(), PointerError>;
    /// Clicks the primary button at the current position.
    fn click(&mut self) -> Result<(), PointerError>;
}

impl<P: Pointer + ?Sized> Pointer for Box<P> {
    fn move_to(&mut self, x: i32, y: i32, duration: Duration) -> Result<(), PointerError> {
        (**self).move_to(x, y, duration)
    }

    fn click(&mut self) -> Result<(), PointerError> {
        (**self).click()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerAction {
    MoveTo { x: i32, y: i32, duration: Duration },
    Click { x: i32, y: i32 },
}

/// Pointer that logs and records instead of touching the real cursor.
///
/// Like a real backend it treats the top-left corner `(0, 0)` as the fail-safe.
#[derive(Debug, Default)]
pub struct DryRunPointer {
    position: Option<(i32, i32)>,
    actions: Vec<PointerAction>,
}

impl DryRunPointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> &[PointerAction] {
        &self.actions
    }

    pub fn clicks(&self) -> Vec<(i32, i32)> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                PointerAction::Click { x, y } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }
}

impl Pointer for DryRunPointer {
    fn move_to(&mut self, x: i32, y: i32, duration: Duration) -> Result<(), PointerError> {
        if (x, y) == (0, 0) {
            return Err(PointerError::FailSafe);
        }
        info!("[dry-run] move to ({}, {}) over {:?}", x, y, duration);
        self.position = Some((x, y));
        self.actions.push(PointerAction::MoveTo { x, y, duration });
        Ok(())
    }

    fn click(&mut self) -> Result<(), PointerError> {
        let (x, y) = self
            .position
            .ok_or_else(|| PointerError::Backend("click before any move".into()))?;
        info!("[dry-run] click at ({}, {})", x, y);
        self.actions.push(PointerAction::Click { x, y });
        Ok(())
    }
}
