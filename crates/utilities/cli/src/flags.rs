//! The logging flag group.

use crate::LogFormat;
use clap::{ArgAction, Args, ValueEnum};
use std::path::PathBuf;
use tracing_appender::rolling::Rotation;

/// How often the log file rolls over.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
#[clap(rename_all = "lowercase")]
pub enum LogRotation {
    /// A new file every minute.
    Minutely,
    /// A new file every hour.
    Hourly,
    /// A new file every day.
    Daily,
    /// A single file.
    #[default]
    Never,
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Minutely => Self::MINUTELY,
            LogRotation::Hourly => Self::HOURLY,
            LogRotation::Daily => Self::DAILY,
            LogRotation::Never => Self::NEVER,
        }
    }
}

/// Logging flags, flattened into every shim command.
///
/// Logs are written to stderr so command output on stdout stays machine-readable.
#[derive(Debug, Default, Clone, PartialEq, Eq, Args)]
pub struct LogArgs {
    /// Verbosity: -v warn, -vv info, -vvv debug, -vvvv trace. Errors are always shown.
    #[arg(short = 'v', long = "verbosity", action = ArgAction::Count, global = true)]
    pub level: u8,
    /// Silence log output on stderr.
    #[arg(long = "logs.quiet", short = 'q', global = true, env = "ARB_SHIM_LOGS_QUIET")]
    pub quiet: bool,
    /// The format of stderr logs.
    #[arg(
        long = "logs.format",
        default_value = "full",
        global = true,
        env = "ARB_SHIM_LOGS_FORMAT"
    )]
    pub format: LogFormat,
    /// Also write logs into this directory.
    #[arg(long = "logs.file.directory", global = true, env = "ARB_SHIM_LOGS_FILE_DIRECTORY")]
    pub file_directory: Option<PathBuf>,
    /// The format of file logs.
    #[arg(long = "logs.file.format", default_value = "json", global = true)]
    pub file_format: LogFormat,
    /// How often the log file rolls over.
    #[arg(long = "logs.file.rotation", default_value = "never", global = true)]
    pub file_rotation: LogRotation,
}
