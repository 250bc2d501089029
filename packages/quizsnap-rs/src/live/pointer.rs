use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use log::debug;
use std::time::Duration;

use crate::clicker::{is_fail_safe_corner, Pointer, PointerError};

/// Interval between intermediate cursor positions while gliding.
const GLIDE_STEP: Duration = Duration::from_millis(10);

fn backend(e: impl std::fmt::Display) -> PointerError {
    PointerError::Backend(e.to_string())
}

/// Drives the OS cursor.
///
/// Before every move, every glide step and every click the cursor position is
/// read back; a cursor sitting in any corner of the main display stops the
/// automation with [`PointerError::FailSafe`].
pub struct EnigoPointer {
    enigo: Enigo,
    display: (i32, i32),
}

impl EnigoPointer {
    pub fn new() -> Result<Self, PointerError> {
        let enigo = Enigo::new(&Settings::default()).map_err(backend)?;
        let display = enigo.main_display().map_err(backend)?;
        debug!("Main display is {}x{}", display.0, display.1);
        Ok(Self { enigo, display })
    }

    fn position(&self) -> Result<(i32, i32), PointerError> {
        let position = self.enigo.location().map_err(backend)?;
        if is_fail_safe_corner(position, self.display) {
            return Err(PointerError::FailSafe);
        }
        Ok(position)
    }
}

impl Pointer for EnigoPointer {
    fn move_to(&mut self, x: i32, y: i32, duration: Duration) -> Result<(), PointerError> {
        let (start_x, start_y) = self.position()?;
        let steps = (duration.as_millis() / GLIDE_STEP.as_millis()).clamp(1, 1000) as u32;
        let lerp = |from: i32, to: i32, t: f64| (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as i32;

        for step in 1..=steps {
            let t = f64::from(step) / f64::from(steps);
            self.enigo
                .move_mouse(lerp(start_x, x, t), lerp(start_y, y, t), Coordinate::Abs)
                .map_err(backend)?;
            if step < steps {
                std::thread::sleep(GLIDE_STEP);
                self.position()?;
            }
        }
        Ok(())
    }

    fn click(&mut self) -> Result<(), PointerError> {
        self.position()?;
        self.enigo.button(Button::Left, Direction::Click).map_err(backend)
    }
}
