//! [tracing_subscriber] utilities.

use crate::{LogArgs, LogRotation};
use ::tracing::Subscriber;
use clap::ValueEnum;
use std::path::PathBuf;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::MakeWriter,
    prelude::__tracing_subscriber_SubscriberExt,
    registry::LookupSpan,
    util::{SubscriberInitExt, TryInitError},
};

/// The file name prefix of rolled log files.
const LOG_FILE_PREFIX: &str = "arb-shim.log";

/// The format of the logs.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
#[clap(rename_all = "lowercase")]
pub enum LogFormat {
    /// Full format (default).
    #[default]
    Full,
    /// JSON format.
    Json,
    /// Pretty format.
    Pretty,
    /// Compact format.
    Compact,
}

/// Logs written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleLogConfig {
    /// The output format.
    pub format: LogFormat,
}

/// Logs written to a rolling file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLogConfig {
    /// The directory holding the log files.
    pub directory_path: PathBuf,
    /// The output format.
    pub format: LogFormat,
    /// How often the file rolls over.
    pub rotation: LogRotation,
}

/// The resolved logging setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// The most verbose level emitted.
    pub global_level: LevelFilter,
    /// Stderr output, unless silenced.
    pub console_logs: Option<ConsoleLogConfig>,
    /// File output, if a directory was given.
    pub file_logs: Option<FileLogConfig>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(LogArgs::default())
    }
}

impl LogConfig {
    /// Resolves the logging flags.
    pub fn new(args: LogArgs) -> Self {
        let global_level = match args.level {
            0 => LevelFilter::ERROR,
            1 => LevelFilter::WARN,
            2 => LevelFilter::INFO,
            3 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        let console_logs = (!args.quiet).then_some(ConsoleLogConfig { format: args.format });
        let file_logs = args.file_directory.map(|directory_path| FileLogConfig {
            directory_path,
            format: args.file_format,
            rotation: args.file_rotation,
        });
        Self { global_level, console_logs, file_logs }
    }

    /// Installs the global tracing subscriber.
    ///
    /// `env_filter` defaults to `RUST_LOG`; the verbosity level is added on top of it.
    pub fn init_tracing_subscriber(
        &self,
        env_filter: Option<EnvFilter>,
    ) -> Result<(), TryInitError> {
        let file_layer = self.file_logs.as_ref().map(|file_logs| {
            let appender = RollingFileAppender::new(
                file_logs.rotation.into(),
                &file_logs.directory_path,
                LOG_FILE_PREFIX,
            );
            format_layer(file_logs.format, appender)
        });
        let console_layer = self
            .console_logs
            .as_ref()
            .map(|console_logs| format_layer(console_logs.format, std::io::stderr));

        let env_filter = env_filter
            .unwrap_or_else(EnvFilter::from_default_env)
            .add_directive(self.global_level.into());

        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(console_layer)
            .try_init()
    }
}

fn format_layer<S, W>(format: LogFormat, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer().with_writer(writer);
    match format {
        LogFormat::Full => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

/// Installs a debug-level subscriber for tests. Later calls are no-ops.
pub fn init_test_tracing() {
    let config = LogConfig {
        global_level: LevelFilter::DEBUG,
        console_logs: Some(ConsoleLogConfig { format: LogFormat::Compact }),
        file_logs: None,
    };
    let _ = config.init_tracing_subscriber(None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::errors_only(0, LevelFilter::ERROR)]
    #[case::warn(1, LevelFilter::WARN)]
    #[case::info(2, LevelFilter::INFO)]
    #[case::debug(3, LevelFilter::DEBUG)]
    #[case::trace(4, LevelFilter::TRACE)]
    #[case::saturates(9, LevelFilter::TRACE)]
    fn test_verbosity_levels(#[case] level: u8, #[case] expected: LevelFilter) {
        let config = LogConfig::new(LogArgs { level, ..Default::default() });
        assert_eq!(config.global_level, expected);
    }

    #[test]
    fn test_quiet_and_file_output() {
        let config = LogConfig::new(LogArgs {
            quiet: true,
            file_directory: Some(PathBuf::from("/var/log/shim")),
            file_format: LogFormat::Json,
            file_rotation: LogRotation::Hourly,
            ..Default::default()
        });
        assert_eq!(config.console_logs, None);
        assert_eq!(
            config.file_logs,
            Some(FileLogConfig {
                directory_path: PathBuf::from("/var/log/shim"),
                format: LogFormat::Json,
                rotation: LogRotation::Hourly,
            })
        );
    }

    #[test]
    fn test_default_logs_to_console() {
        let config = LogConfig::default();
        assert_eq!(config.global_level, LevelFilter::ERROR);
        assert_eq!(config.console_logs, Some(ConsoleLogConfig { format: LogFormat::Full }));
        assert_eq!(config.file_logs, None);
    }

    #[test]
    fn test_init_test_tracing_is_idempotent() {
        init_test_tracing();
        init_test_tracing();
    }
}
