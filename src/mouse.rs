use crate::bounce::Vector;
use crate::bounds::{Point, ScreenBounds};
use crate::platform::InputSink;

use mouse_rs::types::Point as RawPoint;
use mouse_rs::Mouse;
use thiserror::Error;

use std::cell::Cell;

#[derive(Debug, Error)]
pub enum MouseError {
    #[error("internal error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error>),
}

impl From<RawPoint> for Point {
    fn from(value: RawPoint) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

/// [`InputSink`] backed by the system mouse.
pub struct MouseSink {
    inner: Mouse,
    bounds: Option<ScreenBounds>,
    last_pos: Cell<Point>,
}

impl MouseSink {
    /// Probes the pointer once so that a missing input backend fails at
    /// startup rather than on the first tick.
    pub fn new(bounds: Option<ScreenBounds>) -> Result<Self, MouseError> {
        let inner = Mouse::new();
        let pos: Point = inner.get_position()?.into();
        log::debug!("pointer at {pos}");

        let sink = Self {
            inner,
            bounds,
            last_pos: Cell::new(pos),
        };
        log::info!("moving within {}", sink.screen_bounds());

        Ok(sink)
    }

    #[inline]
    pub fn pos(&self) -> Result<Point, MouseError> {
        Ok(self.inner.get_position()?.into())
    }

    fn move_to(&self, p: Point) -> Result<(), MouseError> {
        self.inner.move_to(p.x, p.y)?;
        Ok(())
    }
}

impl InputSink for MouseSink {
    fn pointer_position(&self) -> Point {
        match self.pos() {
            Ok(p) => {
                self.last_pos.set(p);
                p
            }
            Err(e) => {
                log::warn!("failed to get mouse position ({e})");
                self.last_pos.get()
            }
        }
    }

    fn screen_bounds(&self) -> ScreenBounds {
        self.bounds
            .or_else(virtual_screen)
            .unwrap_or(ScreenBounds::FALLBACK)
    }

    fn move_relative(&mut self, offset: Vector) {
        let from = self.pointer_position();
        let to = Point::new(
            from.x.saturating_add(offset.dx),
            from.y.saturating_add(offset.dy),
        );

        match self.move_to(to) {
            Ok(()) => self.last_pos.set(to),
            Err(e) => log::warn!("failed to move mouse ({e})"),
        }
    }
}

/// The bounding box of all monitors, queried on every call so that display
/// changes are picked up.
#[cfg(target_os = "windows")]
fn virtual_screen() -> Option<ScreenBounds> {
    use windows::Win32::UI::WindowsAndMessaging::{
        GetSystemMetrics, SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN,
        SM_YVIRTUALSCREEN,
    };

    // SAFETY: GetSystemMetrics has no preconditions and only reads.
    let (x, y, width, height) = unsafe {
        (
            GetSystemMetrics(SM_XVIRTUALSCREEN),
            GetSystemMetrics(SM_YVIRTUALSCREEN),
            GetSystemMetrics(SM_CXVIRTUALSCREEN),
            GetSystemMetrics(SM_CYVIRTUALSCREEN),
        )
    };
    if width <= 0 || height <= 0 {
        return None;
    }

    Some(ScreenBounds::from_origin_size(x, y, width, height))
}

#[cfg(not(target_os = "windows"))]
fn virtual_screen() -> Option<ScreenBounds> {
    None
}
