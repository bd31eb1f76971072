//! Diagnostics go to stderr so stdout stays machine-readable under
//! `--format json` and `--format raw`.

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Verbosity, from silent to everything.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn filter(self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::OFF,
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

/// Install the global subscriber. Returns `false` when logging is off or a
/// subscriber is already installed.
pub fn init_logging(format: LogFormat, level: LogLevel) -> bool {
    let filter = level.filter();
    if filter == LevelFilter::OFF {
        return false;
    }

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(filter)
        .with_ansi(false)
        .with_target(false);

    let installed = match format {
        LogFormat::Text => builder.compact().try_init(),
        // One flat object per line; scans carry no spans worth repeating.
        LogFormat::Json => builder
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .try_init(),
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_order_by_verbosity() {
        assert!(LogLevel::Off < LogLevel::Error);
        assert!(LogLevel::Warn < LogLevel::Debug);
        assert_eq!(LogLevel::default(), LogLevel::Warn);
    }

    #[test]
    fn level_filters() {
        assert_eq!(LogLevel::Off.filter(), LevelFilter::OFF);
        assert_eq!(LogLevel::Warn.filter(), LevelFilter::WARN);
        assert_eq!(LogLevel::Trace.filter(), LevelFilter::TRACE);
    }

    #[test]
    fn off_installs_nothing() {
        assert!(!init_logging(LogFormat::Json, LogLevel::Off));
    }

    #[test]
    fn level_names_parse() {
        assert_eq!(LogLevel::from_str("off", false), Ok(LogLevel::Off));
        assert_eq!(LogLevel::from_str("debug", false), Ok(LogLevel::Debug));
        assert!(LogLevel::from_str("verbose", false).is_err());
    }
}
