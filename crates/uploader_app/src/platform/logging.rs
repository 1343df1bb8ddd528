//! Log setup for the uploader binary.
//!
//! File output goes to `./uploader.log`, truncated on every run.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "./uploader.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogDestination {
    /// Only `./uploader.log`.
    File,
    /// Only the terminal; warnings and errors go to stderr.
    Terminal,
    /// File and terminal.
    Both,
}

impl LogDestination {
    fn to_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    fn to_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

/// `--verbose` adds per-chunk and listing reconciliation detail.
pub fn level_filter(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

pub fn initialize(destination: LogDestination, verbose: bool) {
    let level = level_filter(verbose);
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        if let Some(file_logger) = file_logger(Path::new(LOG_FILE), level, config) {
            loggers.push(file_logger);
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

fn file_logger(path: &Path, level: LevelFilter, config: Config) -> Option<Box<dyn SharedLogger>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: could not create log file {}: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::{file_logger, level_filter, LogDestination};

    #[test]
    fn verbose_enables_debug_output() {
        assert_eq!(level_filter(false), LevelFilter::Info);
        assert_eq!(level_filter(true), LevelFilter::Debug);
    }

    #[test]
    fn destinations_select_sinks() {
        assert!(LogDestination::File.to_file());
        assert!(!LogDestination::File.to_terminal());
        assert!(LogDestination::Terminal.to_terminal());
        assert!(!LogDestination::Terminal.to_file());
        assert!(LogDestination::Both.to_file() && LogDestination::Both.to_terminal());
    }

    #[test]
    fn unwritable_log_path_is_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("no-such-dir").join("uploader.log");
        assert!(file_logger(&missing, LevelFilter::Info, simplelog::Config::default()).is_none());

        let writable = dir.path().join("uploader.log");
        assert!(file_logger(&writable, LevelFilter::Info, simplelog::Config::default()).is_some());
        assert!(writable.exists());
    }
}
