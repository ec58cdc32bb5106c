use std::sync::OnceLock;

use log::{Level, Log, Metadata, Record};

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Minimal stderr logger; all a one-shot command line run needs.
struct StderrLogger {
    min_level: Level,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{:>5} [{}] {}",
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Installs the logger. `verbosity` counts the `-v` flags on the command
/// line: warnings by default, then info, debug, trace.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    let logger = LOGGER.get_or_init(|| StderrLogger { min_level: level });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level.to_level_filter());
    }
}
