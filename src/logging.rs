//! Logging initialization
//!
//! The TUI owns the terminal, so logs go to `logs/fabric-inquiry-{datetime}.log`
//! in the data directory. Without a data directory they go to stderr.

use crate::config::AppConfig;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "fabric_inquiry=info";

/// Keep alive until exit; dropping it flushes buffered log lines
pub struct LoggingHandle {
    pub _guard: Option<WorkerGuard>,
    pub log_file_path: Option<PathBuf>,
}

pub fn init_logging(config: &AppConfig) -> Result<LoggingHandle> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let Some(logs_dir) = config.logs_dir() else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        return Ok(LoggingHandle {
            _guard: None,
            log_file_path: None,
        });
    };

    std::fs::create_dir_all(&logs_dir)?;
    let file_name = log_file_name(Utc::now());
    let log_file_path = logs_dir.join(&file_name);

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&logs_dir, &file_name));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    Ok(LoggingHandle {
        _guard: Some(guard),
        log_file_path: Some(log_file_path),
    })
}

fn log_file_name(started_at: DateTime<Utc>) -> String {
    format!("fabric-inquiry-{}.log", started_at.format("%Y%m%dT%H%M%SZ"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_log_file_name_uses_utc_timestamp() {
        let started_at = Utc.with_ymd_and_hms(2026, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            log_file_name(started_at),
            "fabric-inquiry-20260309T140507Z.log"
        );
    }
}
