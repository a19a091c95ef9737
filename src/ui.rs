//! Terminal stand-in for the tray icon, its context menu and the custom value
//! dialog.

use crate::app::Event;
use crate::input::KeyCommand;
use crate::menu::{MenuItem, MenuOption, TITLE};
use crate::platform::{TrayIcon, ValueEntryDialog};

use anyhow::Result;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};

use std::io::{stdout, Stdout, Write};
use std::time::Duration;

const MAX_DIGITS: usize = 9;

#[derive(Debug, PartialEq, Eq, Clone)]
struct Row {
    label: String,
    id: Option<u32>,
    checked: bool,
    grayed: bool,
    indent: bool,
    separator: bool,
}

impl Row {
    fn option(o: &MenuOption, indent: bool) -> Self {
        Self {
            label: o.label.clone(),
            id: Some(o.command.id()),
            checked: o.checked,
            grayed: o.grayed,
            indent,
            separator: false,
        }
    }

    fn is_selectable(&self) -> bool {
        self.id.is_some() && !self.grayed
    }
}

fn flatten(items: &[MenuItem]) -> Vec<Row> {
    let mut rows = Vec::new();
    for item in items {
        match item {
            MenuItem::Entry(o) => rows.push(Row::option(o, false)),
            MenuItem::Separator => rows.push(Row {
                label: String::new(),
                id: None,
                checked: false,
                grayed: false,
                indent: false,
                separator: true,
            }),
            MenuItem::Submenu {
                label,
                grayed,
                options,
            } => {
                rows.push(Row {
                    label: label.to_string(),
                    id: None,
                    checked: false,
                    grayed: *grayed,
                    indent: false,
                    separator: false,
                });
                rows.extend(options.iter().map(|o| Row::option(o, true)));
            }
        }
    }
    rows
}

/// Keeps the highlighted row on `id` if it is still selectable, otherwise on
/// the first selectable row.
fn place_cursor(rows: &[Row], id: Option<u32>) -> usize {
    rows.iter()
        .position(|r| r.is_selectable() && id.is_some() && r.id == id)
        .or_else(|| rows.iter().position(Row::is_selectable))
        .unwrap_or(0)
}

fn step_cursor(rows: &[Row], from: usize, down: bool) -> usize {
    let n = rows.len();
    if n == 0 {
        return 0;
    }
    let mut i = from;
    for _ in 0..n {
        i = if down { (i + 1) % n } else { (i + n - 1) % n };
        if rows[i].is_selectable() {
            return i;
        }
    }
    from
}

pub struct TerminalUi {
    out: Stdout,
    enabled: bool,
    rows: Vec<Row>,
    cursor: usize,
}

impl TerminalUi {
    /// Switches the terminal to the alternate screen in raw mode. The
    /// terminal is restored when the value is dropped.
    pub fn enter() -> Result<Self> {
        let mut ui = Self {
            out: stdout(),
            enabled: false,
            rows: Vec::new(),
            cursor: 0,
        };
        execute!(ui.out, cursor::Hide, EnterAlternateScreen, Clear(ClearType::All))?;
        enable_raw_mode()?;

        Ok(ui)
    }

    pub fn set_menu(&mut self, items: &[MenuItem]) {
        let current = self.rows.get(self.cursor).and_then(|r| r.id);
        self.rows = flatten(items);
        self.cursor = place_cursor(&self.rows, current);
    }

    pub fn render(&mut self, status: &str) -> Result<()> {
        let icon = if self.enabled {
            "●".green().bold()
        } else {
            "○".dark_grey()
        };
        queue!(
            self.out,
            Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            PrintStyledContent(icon),
            Print(" "),
            PrintStyledContent(TITLE.bold()),
            cursor::MoveToNextLine(2),
        )?;

        for (i, row) in self.rows.iter().enumerate() {
            let marker = if i == self.cursor { "> " } else { "  " };
            let line = if row.separator {
                format!("{marker}{}", "-".repeat(16))
            } else if row.id.is_none() {
                format!("{marker}{}", row.label)
            } else {
                let check = if row.checked { "[x]" } else { "[ ]" };
                let indent = if row.indent { "    " } else { "" };
                format!("{marker}{indent}{check} {}", row.label)
            };

            if row.grayed || row.separator {
                queue!(self.out, PrintStyledContent(line.dim()))?;
            } else if i == self.cursor {
                queue!(self.out, PrintStyledContent(line.cyan()))?;
            } else {
                queue!(self.out, Print(line))?;
            }
            queue!(self.out, cursor::MoveToNextLine(1))?;
        }

        queue!(
            self.out,
            cursor::MoveToNextLine(1),
            PrintStyledContent("Status:".bold()),
            Print(" "),
            Print(status),
            cursor::MoveToNextLine(1),
            PrintStyledContent(
                "up/down move, enter select, space toggle, q quit".dim()
            ),
            cursor::MoveToNextLine(1),
        )?;
        self.out.flush()?;

        Ok(())
    }

    /// Waits up to `timeout` for input. Cursor movement is handled here and
    /// reported as `None`.
    pub fn next_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        let event = match KeyCommand::read(timeout)? {
            KeyCommand::Quit => Some(Event::Quit),
            KeyCommand::Toggle => Some(Event::ToggleEnabled),
            KeyCommand::Select => self
                .rows
                .get(self.cursor)
                .filter(|r| r.is_selectable())
                .and_then(|r| r.id)
                .map(Event::MenuSelect),
            KeyCommand::Up => {
                self.cursor = step_cursor(&self.rows, self.cursor, false);
                None
            }
            KeyCommand::Down => {
                self.cursor = step_cursor(&self.rows, self.cursor, true);
                None
            }
            _ => None,
        };

        Ok(event)
    }

    /// Reads digits until enter or escape. An empty entry accepts `hint`.
    fn read_value(&mut self, title: &str, hint: u32) -> Result<Option<u32>> {
        let mut buf = String::new();

        loop {
            queue!(
                self.out,
                cursor::MoveToNextLine(1),
                Clear(ClearType::CurrentLine),
                PrintStyledContent(title.bold()),
                Print(": "),
            )?;
            if buf.is_empty() {
                queue!(self.out, PrintStyledContent(hint.to_string().dim()))?;
            } else {
                queue!(self.out, Print(&buf))?;
            }
            queue!(
                self.out,
                PrintStyledContent("  (enter to apply, esc to cancel)".dim()),
                cursor::MoveToPreviousLine(1),
            )?;
            self.out.flush()?;

            match KeyCommand::read_blocking()? {
                KeyCommand::Digit(d) if buf.len() < MAX_DIGITS => {
                    buf.push(char::from(b'0' + d));
                }
                KeyCommand::Backspace => {
                    buf.pop();
                }
                KeyCommand::Select if buf.is_empty() => return Ok(Some(hint)),
                KeyCommand::Select => return Ok(buf.parse::<u32>().ok()),
                KeyCommand::Cancel | KeyCommand::Quit => return Ok(None),
                _ => (),
            }
        }
    }
}

impl TrayIcon for TerminalUi {
    fn set_icon_state(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl ValueEntryDialog for TerminalUi {
    fn prompt(&mut self, title: &str, hint: u32) -> Option<u32> {
        match self.read_value(title, hint) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("value prompt failed ({e})");
                None
            }
        }
    }
}

impl Drop for TerminalUi {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.out, cursor::Show, LeaveAlternateScreen);
    }
}

/// Front end for `--headless`: no menu, and the icon state only shows up in
/// the log.
#[derive(Debug, Default)]
pub struct HeadlessUi;

impl TrayIcon for HeadlessUi {
    fn set_icon_state(&mut self, enabled: bool) {
        log::debug!("icon state: {}", if enabled { "active" } else { "inactive" });
    }
}

impl ValueEntryDialog for HeadlessUi {
    fn prompt(&mut self, _title: &str, _hint: u32) -> Option<u32> {
        None
    }
}
