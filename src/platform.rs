use crate::bounce::Vector;
use crate::bounds::{Point, ScreenBounds};
use crate::settings::StoredSettings;
use crate::store::StoreError;

/// Reads the pointer and moves it. This abstraction allows mocking in tests.
pub trait InputSink {
    fn pointer_position(&self) -> Point;
    fn screen_bounds(&self) -> ScreenBounds;
    /// Fire-and-forget; failures are the implementation's to report.
    fn move_relative(&mut self, offset: Vector);
}

/// The tray icon. Purely cosmetic.
pub trait TrayIcon {
    fn set_icon_state(&mut self, enabled: bool);
}

/// Modal prompt for a custom value. `None` means the user cancelled.
pub trait ValueEntryDialog {
    fn prompt(&mut self, title: &str, hint: u32) -> Option<u32>;
}

/// Flat key/value storage for [`StoredSettings`].
pub trait SettingsStore {
    /// Never fails: anything missing or unreadable comes back as `None`.
    fn load(&self) -> StoredSettings;
    fn save(&self, settings: &StoredSettings) -> Result<(), StoreError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;

    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::time::Duration;

    pub struct MockInput {
        pub position: Point,
        pub bounds: ScreenBounds,
        pub moves: Vec<Vector>,
    }

    impl MockInput {
        pub fn new() -> Self {
            Self {
                position: Point::new(960, 540),
                bounds: ScreenBounds::FALLBACK,
                moves: Vec::new(),
            }
        }

        pub fn at(mut self, x: i32, y: i32) -> Self {
            self.position = Point::new(x, y);
            self
        }

        pub fn with_bounds(mut self, bounds: ScreenBounds) -> Self {
            self.bounds = bounds;
            self
        }
    }

    impl InputSink for MockInput {
        fn pointer_position(&self) -> Point {
            self.position
        }

        fn screen_bounds(&self) -> ScreenBounds {
            self.bounds
        }

        fn move_relative(&mut self, offset: Vector) {
            self.moves.push(offset);
            self.position.x += offset.dx;
            self.position.y += offset.dy;
        }
    }

    #[derive(Default)]
    pub struct MockUi {
        pub icon_states: Vec<bool>,
        pub replies: VecDeque<Option<u32>>,
        pub prompts: Vec<(String, u32)>,
        pub think_time: Duration,
    }

    impl MockUi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn replying(mut self, reply: Option<u32>) -> Self {
            self.replies.push_back(reply);
            self
        }

        /// Makes every prompt block for `think_time` before replying.
        pub fn taking(mut self, think_time: Duration) -> Self {
            self.think_time = think_time;
            self
        }
    }

    impl TrayIcon for MockUi {
        fn set_icon_state(&mut self, enabled: bool) {
            self.icon_states.push(enabled);
        }
    }

    impl ValueEntryDialog for MockUi {
        fn prompt(&mut self, title: &str, hint: u32) -> Option<u32> {
            self.prompts.push((title.to_string(), hint));
            std::thread::sleep(self.think_time);
            self.replies.pop_front().flatten()
        }
    }

    #[derive(Default)]
    pub struct MockStore {
        pub stored: StoredSettings,
        pub saved: RefCell<Vec<StoredSettings>>,
        pub fail: bool,
    }

    impl MockStore {
        pub fn with(stored: StoredSettings) -> Self {
            Self {
                stored,
                ..Default::default()
            }
        }
    }

    impl SettingsStore for MockStore {
        fn load(&self) -> StoredSettings {
            self.stored
        }

        fn save(&self, settings: &StoredSettings) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::NoConfigDir);
            }
            self.saved.borrow_mut().push(*settings);
            Ok(())
        }
    }
}
