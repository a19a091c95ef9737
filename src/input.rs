use std::time::Duration;

use anyhow::Result;
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum KeyCommand {
    Quit,
    Toggle,
    Up,
    Down,
    Select,
    Cancel,
    Backspace,
    Digit(u8),
    Redraw,
    None,
    Unknown,
}

impl KeyCommand {
    /// Waits up to `timeout` for a key.
    pub fn read(timeout: Duration) -> Result<Self> {
        if poll(timeout)? {
            return Ok(read()?.into());
        }

        Ok(Self::None)
    }

    /// Blocks until the next key.
    pub fn read_blocking() -> Result<Self> {
        Ok(read()?.into())
    }
}

impl From<Event> for KeyCommand {
    fn from(value: Event) -> Self {
        match value {
            Event::Key(KeyEvent {
                kind: KeyEventKind::Release,
                ..
            }) => Self::None,
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }) => Self::Quit,
            Event::Key(KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                ..
            }) => match c {
                'q' => Self::Quit,
                ' ' | 'e' => Self::Toggle,
                'k' => Self::Up,
                'j' => Self::Down,
                '0'..='9' => Self::Digit(c as u8 - b'0'),
                _ => Self::Unknown,
            },
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Up => Self::Up,
                KeyCode::Down => Self::Down,
                KeyCode::Enter => Self::Select,
                KeyCode::Esc => Self::Cancel,
                KeyCode::Backspace => Self::Backspace,
                _ => Self::Unknown,
            },
            Event::Resize(..) => Self::Redraw,
            _ => Self::None,
        }
    }
}
