use anyhow::{bail, Result};
use clap::ArgMatches;

use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

/// The virtual screen the pointer travels in. `max_x`/`max_y` are exclusive
/// edges, i.e. `min + width` and `min + height`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ScreenBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl ScreenBounds {
    /// Used when neither the command line nor the platform can tell us the
    /// screen size.
    pub const FALLBACK: Self = Self {
        min_x: 0,
        min_y: 0,
        max_x: 1920,
        max_y: 1080,
    };

    /// Builds bounds from two opposite corners in any order.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    #[cfg_attr(not(target_os = "windows"), allow(dead_code))]
    pub fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    pub fn has_empty_range(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn from_matches(value: &ArgMatches) -> Result<Option<Self>> {
        let Some(coords) = value.get_many::<i32>("screen-bounds") else {
            return Ok(None);
        };

        match coords.copied().collect::<Vec<i32>>().as_slice() {
            [x1, y1, x2, y2] => Ok(Some(Self::new(*x1, *y1, *x2, *y2))),
            other => bail!("screen bounds need 4 coordinates, got {}", other.len()),
        }
    }
}

impl fmt::Display for ScreenBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "screen(p1=({}, {}), p2=({}, {}))",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}
