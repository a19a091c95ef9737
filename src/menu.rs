//! The tray context menu.
//!
//! Menu entries carry a [`MenuCommand`] whose numeric id is what the front end
//! hands back when the user picks something. [`resolve`] turns a configuration
//! command into the [`Change`] it asks for, prompting for a value when the
//! custom entry was picked.

use crate::platform::ValueEntryDialog;
use crate::settings::Settings;

pub const INTERVAL_PRESETS_MS: [u32; 5] = [1000, 5000, 10000, 30000, 60000];
pub const STEP_PRESETS: [u32; 5] = [1, 5, 10, 30, 60];

const ID_ENABLED: u32 = 1;
const ID_QUIT: u32 = 2;
const ID_INTERVAL_START: u32 = 3;
const ID_INTERVAL_CUSTOM: u32 = ID_INTERVAL_START + INTERVAL_PRESETS_MS.len() as u32;
const ID_STEP_START: u32 = ID_INTERVAL_CUSTOM + 1;
const ID_STEP_CUSTOM: u32 = ID_STEP_START + STEP_PRESETS.len() as u32;

pub const TITLE: &str = "La Flor";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MenuCommand {
    ToggleEnabled,
    Quit,
    IntervalPreset(usize),
    IntervalCustom,
    StepPreset(usize),
    StepCustom,
}

impl MenuCommand {
    pub fn id(self) -> u32 {
        match self {
            MenuCommand::ToggleEnabled => ID_ENABLED,
            MenuCommand::Quit => ID_QUIT,
            MenuCommand::IntervalPreset(i) => ID_INTERVAL_START + i as u32,
            MenuCommand::IntervalCustom => ID_INTERVAL_CUSTOM,
            MenuCommand::StepPreset(i) => ID_STEP_START + i as u32,
            MenuCommand::StepCustom => ID_STEP_CUSTOM,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        let cmd = match id {
            ID_ENABLED => MenuCommand::ToggleEnabled,
            ID_QUIT => MenuCommand::Quit,
            ID_INTERVAL_CUSTOM => MenuCommand::IntervalCustom,
            ID_STEP_CUSTOM => MenuCommand::StepCustom,
            id if (ID_INTERVAL_START..ID_INTERVAL_CUSTOM).contains(&id) => {
                MenuCommand::IntervalPreset((id - ID_INTERVAL_START) as usize)
            }
            id if (ID_STEP_START..ID_STEP_CUSTOM).contains(&id) => {
                MenuCommand::StepPreset((id - ID_STEP_START) as usize)
            }
            _ => return None,
        };
        Some(cmd)
    }

    pub fn is_custom(self) -> bool {
        matches!(self, MenuCommand::IntervalCustom | MenuCommand::StepCustom)
    }
}

/// One selectable entry.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MenuOption {
    pub label: String,
    pub command: MenuCommand,
    pub checked: bool,
    pub grayed: bool,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum MenuItem {
    Entry(MenuOption),
    Separator,
    Submenu {
        label: &'static str,
        grayed: bool,
        options: Vec<MenuOption>,
    },
}

/// A configuration mutation requested through the menu.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Change {
    IntervalMs(u32),
    Step(u32),
}

pub fn format_interval(ms: u32) -> String {
    if ms % 1000 == 0 {
        format!("{} s", ms / 1000)
    } else {
        format!("{} s", f64::from(ms) / 1000.)
    }
}

pub fn format_step(px: u32) -> String {
    format!("{px} px")
}

pub fn interval_options(settings: &Settings) -> Vec<MenuOption> {
    build_options(
        &INTERVAL_PRESETS_MS,
        settings.interval_ms(),
        !settings.enabled(),
        MenuCommand::IntervalPreset,
        MenuCommand::IntervalCustom,
        format_interval,
    )
}

pub fn step_options(settings: &Settings) -> Vec<MenuOption> {
    build_options(
        &STEP_PRESETS,
        settings.step(),
        !settings.enabled(),
        MenuCommand::StepPreset,
        MenuCommand::StepCustom,
        format_step,
    )
}

fn build_options(
    presets: &[u32],
    current: u32,
    grayed: bool,
    preset_cmd: fn(usize) -> MenuCommand,
    custom_cmd: MenuCommand,
    format: fn(u32) -> String,
) -> Vec<MenuOption> {
    let selected = presets.iter().position(|v| *v == current);

    let mut options = presets
        .iter()
        .enumerate()
        .map(|(i, v)| MenuOption {
            label: format(*v),
            command: preset_cmd(i),
            checked: selected == Some(i),
            grayed,
        })
        .collect::<Vec<_>>();

    let custom_label = match selected {
        Some(_) => "Custom...".to_string(),
        None => format!("Custom ({})...", format(current)),
    };
    options.push(MenuOption {
        label: custom_label,
        command: custom_cmd,
        checked: selected.is_none(),
        grayed,
    });

    options
}

/// The full context menu, top to bottom.
pub fn build(settings: &Settings) -> Vec<MenuItem> {
    let grayed = !settings.enabled();

    vec![
        MenuItem::Entry(MenuOption {
            label: "Enabled".to_string(),
            command: MenuCommand::ToggleEnabled,
            checked: settings.enabled(),
            grayed: false,
        }),
        MenuItem::Separator,
        MenuItem::Submenu {
            label: "Interval",
            grayed,
            options: interval_options(settings),
        },
        MenuItem::Submenu {
            label: "Delta",
            grayed,
            options: step_options(settings),
        },
        MenuItem::Separator,
        MenuItem::Entry(MenuOption {
            label: "Quit".to_string(),
            command: MenuCommand::Quit,
            checked: false,
            grayed: false,
        }),
    ]
}

/// Maps an interval or step command to the change it requests.
///
/// Custom entries open the value dialog; cancelling it, or entering zero,
/// yields `None`. Custom intervals are entered in whole seconds. Commands
/// that are not about configuration also yield `None`.
pub fn resolve<D: ValueEntryDialog>(
    command: MenuCommand,
    settings: &Settings,
    dialog: &mut D,
) -> Option<Change> {
    match command {
        MenuCommand::IntervalPreset(i) => {
            INTERVAL_PRESETS_MS.get(i).copied().map(Change::IntervalMs)
        }
        MenuCommand::StepPreset(i) => STEP_PRESETS.get(i).copied().map(Change::Step),
        MenuCommand::IntervalCustom => {
            let hint = (settings.interval_ms() / 1000).max(1);
            let secs = prompt_positive(dialog, "Custom interval (seconds)", hint)?;
            match secs.checked_mul(1000) {
                Some(ms) => Some(Change::IntervalMs(ms)),
                None => {
                    log::warn!("custom interval of {secs} s is too long, ignoring");
                    None
                }
            }
        }
        MenuCommand::StepCustom => {
            prompt_positive(dialog, "Custom delta (pixels)", settings.step()).map(Change::Step)
        }
        MenuCommand::ToggleEnabled | MenuCommand::Quit => None,
    }
}

fn prompt_positive<D: ValueEntryDialog>(dialog: &mut D, title: &str, hint: u32) -> Option<u32> {
    match dialog.prompt(title, hint) {
        Some(0) => {
            log::warn!("ignoring custom value of 0");
            None
        }
        Some(value) => Some(value),
        None => {
            log::debug!("custom value prompt cancelled");
            None
        }
    }
}
