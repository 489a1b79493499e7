#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod flags;
pub use flags::{LogArgs, LogRotation};

mod tracing;
pub use tracing::{ConsoleLogConfig, FileLogConfig, LogConfig, LogFormat, init_test_tracing};

mod styles;
pub use styles::cli_styles;
