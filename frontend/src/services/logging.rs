use log::{Level, LevelFilter, Log, Metadata, Record};

/// `log` backend writing to the browser console, one line per record,
/// prefixed with the module that emitted it.
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(record.target(), &record.args().to_string());
        match record.level() {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger; a second call keeps the first logger
pub fn init(level: LevelFilter) {
    if log::set_boxed_logger(Box::new(ConsoleLogger::new(level))).is_ok() {
        log::set_max_level(level);
    }
}

fn format_line(target: &str, message: &str) -> String {
    let component = target.rsplit("::").next().unwrap_or(target);
    format!("[{}] {}", component, message)
}
