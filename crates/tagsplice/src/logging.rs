use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Resolved logging settings for one run.
#[derive(Copy, Clone, Debug)]
pub struct LogSettings {
    pub format: LogFormat,
    pub level: LogLevel,
}

impl LogSettings {
    /// `--quiet` wins over any configured level.
    pub fn new(format: LogFormat, level: LogLevel, quiet: bool) -> Self {
        let level = if quiet { LogLevel::Off } else { level };
        Self { format, level }
    }

    /// Install the stderr subscriber. Stdout stays reserved for command output.
    pub fn init(self) {
        let builder = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(LevelFilter::from(self.level))
            .with_ansi(false)
            .with_target(false);

        match self.format {
            LogFormat::Text => {
                let _ = builder.try_init();
            }
            LogFormat::Json => {
                let _ = builder.json().try_init();
            }
        }
    }
}
