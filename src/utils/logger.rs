// Logger initialization
//
// The terminal UI owns stdout, so in that mode logs go to a daily-rolling
// file. Headless runs log to stderr.

use crate::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "docqa.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
}

/// Install the global subscriber. Keep the returned guard alive until exit,
/// otherwise buffered log lines are lost.
pub fn init_logger(config: &LoggingConfig, target: LogTarget) -> anyhow::Result<WorkerGuard> {
    let filter = EnvFilter::try_new(&config.filter)
        .unwrap_or_else(|_| EnvFilter::new("docqa=info"));

    let (writer, guard) = match target {
        LogTarget::File => {
            std::fs::create_dir_all(&config.directory)?;
            let appender = tracing_appender::rolling::daily(&config.directory, LOG_FILE_PREFIX);
            tracing_appender::non_blocking(appender)
        }
        LogTarget::Stderr => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(target == LogTarget::Stderr),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(guard)
}
