use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

use std::path::Path;

pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global logger.
///
/// Records go to stderr (colored) when `stderr` is set and to `log_file`
/// (plain) when given. With neither, no logger is installed.
pub fn setup(verbosity: u8, stderr: bool, log_file: Option<&Path>) -> Result<(), fern::InitError> {
    if !stderr && log_file.is_none() {
        return Ok(());
    }

    let mut dispatch = fern::Dispatch::new()
        .level(level_for(verbosity))
        .level_for("mouse_rs", LevelFilter::Warn);

    if stderr {
        let colors = ColoredLevelConfig::new()
            .error(Color::Red)
            .warn(Color::Yellow)
            .info(Color::Cyan)
            .debug(Color::White)
            .trace(Color::BrightBlack);

        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "{} {:<5} {}",
                        chrono::Local::now().format("%H:%M:%S%.3f"),
                        colors.color(record.level()),
                        message
                    ))
                })
                .chain(std::io::stderr()),
        );
    }

    if let Some(path) = log_file {
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{} {:<5} [{}] {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                        record.level(),
                        record.target(),
                        message
                    ))
                })
                .chain(fern::log_file(path)?),
        );
    }

    dispatch.apply()?;
    Ok(())
}
