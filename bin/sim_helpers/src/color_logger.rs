use std::io::{self, Write};

use colored::Colorize;
use log::{Level, LevelFilter, Metadata, Record};

/// Terminal backend for the `log` facade with colored level tags.
pub struct ColorLogger {
    max_level: LevelFilter,
}

impl ColorLogger {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let max_level = if quiet {
            LevelFilter::Error
        } else if verbose {
            LevelFilter::Trace
        } else {
            LevelFilter::Info
        };
        Self { max_level }
    }

    pub fn init(self) {
        let max_level = self.max_level;
        log::set_boxed_logger(Box::new(self)).expect("logger already installed");
        log::set_max_level(max_level);
    }
}

impl log::Log for ColorLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            Level::Error => eprintln!("{} {}", "[ERROR]".red().bold(), record.args()),
            Level::Warn => eprintln!("{} {}", "[WARN]".yellow().bold(), record.args()),
            _ => eprintln!("[{}] {}", record.level().to_string().blue(), record.args()),
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
