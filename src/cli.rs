use anyhow::{anyhow, ensure, Result};
use clap::builder::ValueParser;
use clap::{arg, command, value_parser, Arg, ArgAction, Command};

use std::path::PathBuf;
use std::time::Duration;

const ABOUT: &str = "Keeps the machine from going idle by nudging the mouse \
pointer back and forth across the screen.";

const INTERVAL_LONG_HELP: &str = "Specify how much time should elapse between \
mouse movements. If not specified, the stored setting is used (1 second by \
default).

A single number is parsed as SECONDS between movements. Numbers can \
be specified as integers (e.g., 42) or floating point numbers (e.g., 0.42). \
A single number argument must be a positive value.";

const STEP_LONG_HELP: &str = "Number of pixels the pointer travels on each \
movement, along both axes. The pointer reverses direction when it reaches \
an edge of the screen. If not specified, the stored setting is used (1 pixel \
by default).";

const SCREEN_BOUNDS_LONG_HELP: &str = "Use this rectangle as the screen \
instead of asking the platform. On Windows the whole virtual screen (all \
monitors) is used by default; elsewhere the default is 0,0,1920,1080.";

const HEADLESS_LONG_HELP: &str = "Run without the terminal menu. The \
generator starts enabled and runs until the process is killed. Settings are \
read but never written in this mode.";

const LOG_FILE_LONG_HELP: &str = "Append log records to FILE. In the \
interactive mode this is the only place log records go, since the terminal \
is taken by the menu.";

pub fn build() -> Command {
    command!()
        .about(ABOUT)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .after_help("Use '--help' for detailed information")
        .after_long_help("Use '-h' for brief information")
        .arg(
            arg!([INTERVAL] "Duration between movements (see '--help' for formatting)")
                .long_help(INTERVAL_LONG_HELP)
                .value_parser(ValueParser::new(parse_interval)),
        )
        .next_help_heading("Mouse Options")
        .arg(
            arg!(-s --step <PX> "Pixels moved on each movement")
                .long_help(STEP_LONG_HELP)
                .value_parser(ValueParser::new(parse_step)),
        )
        .arg(arg!(-e --enable "Start with movements enabled"))
        .arg(Arg::new("screen-bounds")
            .short('b')
            .long("screen-bounds")
            .help("Bounce inside a rectangle instead of the detected screen")
            .long_help(SCREEN_BOUNDS_LONG_HELP)
            .num_args(1..=4)
            .value_names(["X1", "Y1", "X2", "Y2"])
            .value_delimiter(',')
            .value_parser(value_parser!(i32))
            .allow_negative_numbers(true))
        .next_help_heading("Options")
        .arg(
            arg!(-c --config <FILE> "Settings file (default: user config directory)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(arg!(--headless "Run without the terminal menu").long_help(HEADLESS_LONG_HELP))
        .arg(
            arg!(-l --"log-file" <FILE> "Write log records to a file")
                .long_help(LOG_FILE_LONG_HELP)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(arg!(-v --verbose "Increase logging verbosity (repeatable)").action(ArgAction::Count))
        .arg(arg!(-h --help "Print help information and quit").action(ArgAction::Help))
        .arg(arg!(-V --version "Print version information and quit").action(ArgAction::Version))
}

pub fn parse_interval(s: &str) -> Result<Duration> {
    if let Ok(result) = parse_sec_u64(s) {
        return Ok(result);
    }

    if let Ok(result) = parse_sec_f64(s) {
        return Ok(result);
    }

    Err(anyhow!("could not parse input as an interval"))
}

fn parse_sec_u64(s: &str) -> Result<Duration> {
    match s.parse::<u64>() {
        Ok(value) => {
            ensure!(value > 0, "interval must be a positive number");
            Ok(Duration::from_secs(value))
        }
        Err(e) => Err(anyhow!(e)),
    }
}

fn parse_sec_f64(s: &str) -> Result<Duration> {
    match s.parse::<f64>() {
        Ok(value) => {
            ensure!(value.is_finite(), "interval must be a finite number");
            ensure!(value > 0., "interval must be a positive number");
            let ms = value * 1000.;
            ensure!(ms.round() >= 1., "interval must be at least 1 millisecond");
            Ok(Duration::from_millis(ms.round() as u64))
        }
        Err(e) => Err(anyhow!(e)),
    }
}

fn parse_step(s: &str) -> Result<u32> {
    // parse first as i64 so we can report better error messages
    match s.parse::<i64>() {
        Ok(value) => {
            ensure!(value > 0, "step must be a positive number");
            ensure!(
                value <= i32::MAX as i64,
                format!("step must be between 1 and {}", i32::MAX)
            );
            Ok(value as u32)
        }
        Err(e) => Err(anyhow!(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build().debug_assert();
    }

    #[test]
    fn intervals() {
        assert_eq!(parse_interval("5").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_interval("0.5").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_interval("1.25").unwrap(), Duration::from_millis(1250));
        assert!(parse_interval("0").is_err());
        assert!(parse_interval("-1").is_err());
        assert!(parse_interval("0.0001").is_err());
        assert!(parse_interval("inf").is_err());
        assert!(parse_interval("soon").is_err());
    }

    #[test]
    fn steps() {
        assert_eq!(parse_step("26").unwrap(), 26);
        assert!(parse_step("0").is_err());
        assert!(parse_step("-3").is_err());
        assert!(parse_step("99999999999").is_err());
        assert!(parse_step("ten").is_err());
    }

    #[test]
    fn parses_all_options() {
        let m = build()
            .try_get_matches_from([
                "laflor",
                "2.5",
                "--step",
                "10",
                "--enable",
                "-b",
                "-1280",
                "0",
                "1920",
                "1080",
                "--headless",
                "-vv",
            ])
            .unwrap();

        assert_eq!(
            m.get_one::<Duration>("INTERVAL"),
            Some(&Duration::from_millis(2500))
        );
        assert_eq!(m.get_one::<u32>("step"), Some(&10));
        assert!(m.get_flag("enable"));
        assert!(m.get_flag("headless"));
        assert_eq!(m.get_count("verbose"), 2);
        let coords = m
            .get_many::<i32>("screen-bounds")
            .unwrap()
            .copied()
            .collect::<Vec<_>>();
        assert_eq!(coords, vec![-1280, 0, 1920, 1080]);
    }
}
