//! Logging setup
//!
//! One-line JSON records to a daily-rolling file, plus a human-readable
//! stdout layer in debug builds. Both honor RUST_LOG-style filters, and
//! `log` macro calls are bridged into tracing.

use log::LevelFilter;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();
static LOGGER_READY: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize the logging stack. Safe to call more than once; only the
/// first call takes effect.
pub fn init_logger(log_dir: PathBuf) -> anyhow::Result<()> {
    if LOGGER_READY.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(&log_dir)?;
    let _ = LOG_DIR.set(log_dir.clone());

    // Forward log-crate records into tracing
    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let file_appender = rolling::daily(&log_dir, "learnquest.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = FILE_GUARD.set(guard);

    let json_layer = fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(file_filter());

    let stdout_layer = if cfg!(debug_assertions) {
        Some(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_filter(stdout_filter()),
        )
    } else {
        None
    };

    let subscriber = Registry::default().with(json_layer).with(stdout_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = LOGGER_READY.set(());

    tracing::info!(
        target: "learnquest::logging",
        log_dir = %log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        profile = if cfg!(debug_assertions) { "Debug" } else { "Release" },
        "Logger initialized"
    );

    Ok(())
}

fn file_filter() -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        "debug,learnquest=trace"
    } else {
        "info,learnquest=info"
    };

    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn stdout_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("debug,learnquest=trace"))
        .unwrap_or_else(|_| EnvFilter::new("debug"))
}

/// Directory the file layer writes to, once initialized.
pub fn get_log_dir() -> Option<PathBuf> {
    LOG_DIR.get().cloned()
}

/// Default directory for logs and other app data.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("learnquest")
}
