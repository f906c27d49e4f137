//! Minimal stderr logger behind the `-v` flags.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Install the logger at `level`.
///
/// Fails if a logger is already installed; the level is left unchanged then.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Strip `-v`/`-vv` from `args`, returning the level they select.
pub fn take_verbosity(args: &mut Vec<String>) -> LevelFilter {
    let mut level = LevelFilter::Off;
    args.retain(|arg| {
        let selected = match arg.as_str() {
            "-v" => LevelFilter::Debug,
            "-vv" => LevelFilter::Trace,
            _ => return true,
        };
        level = level.max(selected);
        false
    });
    level
}
