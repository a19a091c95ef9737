//! The application controller.
//!
//! Owns the [`Settings`], the [`Scheduler`] and the platform collaborators,
//! and consumes [`Event`]s from whatever front end drives the loop. Everything
//! runs on the caller's thread.

use crate::menu::{self, Change, MenuCommand};
use crate::platform::{InputSink, SettingsStore, TrayIcon, ValueEntryDialog};
use crate::scheduler::Scheduler;
use crate::settings::{Settings, StoredSettings};
use crate::store::StoreError;

use std::time::{Duration, Instant};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Event {
    Tick,
    MenuSelect(u32),
    ToggleEnabled,
    Quit,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App<S, U> {
    settings: Settings,
    scheduler: Scheduler,
    sink: S,
    ui: U,
}

impl<S, U> App<S, U>
where
    S: InputSink,
    U: TrayIcon + ValueEntryDialog,
{
    /// Builds the controller from stored settings, arming the timer when they
    /// say the generator was enabled.
    pub fn start(stored: &StoredSettings, sink: S, mut ui: U, now: Instant) -> Self {
        ui.set_icon_state(false);

        let mut app = Self {
            settings: Settings::restore(stored),
            scheduler: Scheduler::new(),
            sink,
            ui,
        };
        if stored.enabled == Some(true) {
            app.toggle(now);
        }

        log::info!(
            "started ({}, {} px every {} ms)",
            if app.settings.enabled() { "enabled" } else { "disabled" },
            app.settings.step(),
            app.settings.interval_ms()
        );
        app
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.scheduler.is_armed()
    }

    /// How long the loop may wait for input before the next tick is due.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_due(now)
    }

    /// Delivers a [`Event::Tick`] if the timer has elapsed.
    pub fn poll_timer(&mut self, now: Instant) -> Flow {
        if self.scheduler.poll(now) {
            return self.dispatch(Event::Tick, now);
        }
        Flow::Continue
    }

    pub fn dispatch(&mut self, event: Event, now: Instant) -> Flow {
        log::trace!("dispatching {event:?}");

        match event {
            Event::Tick => self.tick(),
            Event::ToggleEnabled => self.toggle(now),
            Event::MenuSelect(id) => match MenuCommand::from_id(id) {
                Some(MenuCommand::Quit) => return self.quit(),
                Some(MenuCommand::ToggleEnabled) => self.toggle(now),
                Some(cmd) => self.configure(cmd, now),
                None => log::warn!("ignoring unknown menu command {id}"),
            },
            Event::Quit => return self.quit(),
        }

        Flow::Continue
    }

    /// Writes the current settings to `store`.
    pub fn save<T: SettingsStore>(&self, store: &T) -> Result<(), StoreError> {
        store.save(&self.settings.to_stored())
    }

    fn tick(&mut self) {
        if !self.scheduler.is_armed() {
            log::debug!("dropping stale tick");
            return;
        }
        self.scheduler.run_tick(&mut self.settings, &mut self.sink);
    }

    fn toggle(&mut self, now: Instant) {
        self.settings.toggle_enabled(&mut self.scheduler, &self.sink, &mut self.ui, now);
    }

    fn configure(&mut self, command: MenuCommand, now: Instant) {
        if !self.settings.enabled() {
            log::debug!("ignoring {command:?} while disabled");
            return;
        }

        let change = menu::resolve(command, &self.settings, &mut self.ui);
        // the prompt blocks, so a custom value takes effect when it closes
        let applied_at = if command.is_custom() {
            now.max(Instant::now())
        } else {
            now
        };

        match change {
            Some(Change::IntervalMs(ms)) => {
                self.settings.set_interval(ms, &mut self.scheduler, applied_at)
            }
            Some(Change::Step(px)) => self.settings.set_step(px, &self.sink),
            None => (),
        }
    }

    /// Stops the generator before the collaborators go away.
    fn quit(&mut self) -> Flow {
        if self.scheduler.is_armed() {
            self.scheduler.disarm();
        }
        log::info!("quitting");
        Flow::Quit
    }
}
