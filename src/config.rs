use crate::bounds::ScreenBounds;
use crate::settings::StoredSettings;

use anyhow::{bail, Context, Result};
use clap::ArgMatches;

use std::path::PathBuf;
use std::time::Duration;

/// Everything the process needs from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` means the default location in the user config directory.
    pub store_path: Option<PathBuf>,
    pub screen_bounds: Option<ScreenBounds>,
    /// Applied on top of whatever the store holds.
    pub overrides: StoredSettings,
    pub headless: bool,
    pub verbosity: u8,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let interval = matches
            .get_one::<Duration>("INTERVAL")
            .map(|d| millis(*d))
            .transpose()?;

        let screen_bounds = ScreenBounds::from_matches(matches)?;
        if let Some(bounds) = screen_bounds {
            if bounds.has_empty_range() {
                bail!("bounds {bounds} will result in no mouse movement");
            }
        }

        Ok(Self {
            store_path: matches.get_one::<PathBuf>("config").cloned(),
            screen_bounds,
            overrides: StoredSettings {
                interval,
                step: matches.get_one::<u32>("step").copied(),
                enabled: matches.get_flag("enable").then_some(true),
            },
            headless: matches.get_flag("headless"),
            verbosity: matches.get_count("verbose"),
            log_file: matches.get_one::<PathBuf>("log-file").cloned(),
        })
    }
}

fn millis(d: Duration) -> Result<u32> {
    let ms = u32::try_from(d.as_millis()).context("interval is too long")?;
    if ms == 0 {
        bail!("interval must be at least 1 millisecond");
    }
    Ok(ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli;

    fn config(args: &[&str]) -> Result<Config> {
        let matches = cli::build().try_get_matches_from(
            std::iter::once("laflor").chain(args.iter().copied()),
        )?;
        Config::from_matches(&matches)
    }

    #[test]
    fn no_arguments() {
        let c = config(&[]).unwrap();
        assert_eq!(c.store_path, None);
        assert_eq!(c.screen_bounds, None);
        assert_eq!(c.overrides, StoredSettings::default());
        assert!(!c.headless);
        assert_eq!(c.verbosity, 0);
        assert_eq!(c.log_file, None);
    }

    #[test]
    fn overrides_from_arguments() {
        let c = config(&["0.5", "-s", "30", "-e"]).unwrap();
        assert_eq!(
            c.overrides,
            StoredSettings {
                interval: Some(500),
                step: Some(30),
                enabled: Some(true),
            }
        );
    }

    #[test]
    fn paths_and_bounds() {
        let c = config(&[
            "-c",
            "/tmp/flor.json",
            "-l",
            "/tmp/flor.log",
            "-b",
            "0,0,800,600",
        ])
        .unwrap();
        assert_eq!(c.store_path, Some(PathBuf::from("/tmp/flor.json")));
        assert_eq!(c.log_file, Some(PathBuf::from("/tmp/flor.log")));
        assert_eq!(c.screen_bounds, Some(ScreenBounds::new(0, 0, 800, 600)));
    }

    #[test]
    fn rejects_flat_or_partial_bounds() {
        assert!(config(&["-b", "0,0,0,600"]).is_err());
        assert!(config(&["-b", "0,0,800"]).is_err());
    }

    #[test]
    fn interval_limits() {
        assert!(millis(Duration::from_secs(u64::from(u32::MAX))).is_err());
        assert!(millis(Duration::from_micros(10)).is_err());
        assert_eq!(millis(Duration::from_secs(60)).unwrap(), 60000);
    }
}
