use std::path::PathBuf;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "gift-exchange-backend";

/// Keeps the background log writers alive; drop it only at shutdown.
pub struct Logger {
    pub guards: Vec<WorkerGuard>,
}

impl Logger {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let guards = Self::setup_logging()?;
        Ok(Logger { guards })
    }

    /// Console output filtered by `RUST_LOG`, plus daily-rolling text and JSON
    /// files under `LOG_DIR` and a separate error-only file.
    pub fn setup_logging() -> Result<Vec<WorkerGuard>, Box<dyn std::error::Error>> {
        let log_dir = PathBuf::from(std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()));
        std::fs::create_dir_all(log_dir.join("error"))?;

        let console_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,gift_exchange_backend=debug"));
        let file_log_level = std::env::var("FILE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let (general_writer, general_guard) =
            non_blocking(rolling::daily(&log_dir, format!("{}.log", LOG_FILE_PREFIX)));
        let (json_writer, json_guard) =
            non_blocking(rolling::daily(&log_dir, format!("{}.json", LOG_FILE_PREFIX)));
        let (error_writer, error_guard) =
            non_blocking(rolling::daily(log_dir.join("error"), format!("{}-error.log", LOG_FILE_PREFIX)));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_ansi(true)
                    .with_filter(console_filter),
            )
            .with(
                fmt::layer()
                    .with_writer(general_writer)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(json_writer)
                    .with_ansi(false)
                    .with_target(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .with(
                fmt::layer()
                    .with_writer(error_writer)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("error")),
            )
            .try_init()?;

        Ok(vec![general_guard, json_guard, error_guard])
    }
}
