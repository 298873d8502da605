//! Tracing subscriber setup used by the server and the admin tool.

use std::{env, sync::OnceLock};

use tracing_appender::{
    non_blocking,
    non_blocking::NonBlocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        fmt,
        time::ChronoLocal,
        writer::{BoxMakeWriter, MakeWriterExt},
    },
};

use crate::error::AppError;

/// Guard to ensure buffered logs are flushed on shutdown.
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

pub fn init(file_prefix: &str) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let log_dir = env::var("LOG_DIR").ok();

    let writer = match &log_dir {
        Some(dir) => {
            let stdout = std::io::stdout.with_max_level(tracing::Level::INFO);
            BoxMakeWriter::new(stdout.and(init_file_writer(dir, file_prefix)?))
        }
        None => BoxMakeWriter::new(std::io::stdout),
    };

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(false)
        .with_level(true)
        .with_writer(writer);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(log_dir.is_none()).init();
    }

    tracing::info!(json, file_output = log_dir.is_some(), "logger initialized");
    Ok(())
}

fn init_file_writer(dir: &str, file_prefix: &str) -> Result<NonBlocking, AppError> {
    let max_files = env::var("LOG_MAX_FILES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok());

    let mut file_builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(format!("{file_prefix}.log"));

    if let Some(n) = max_files {
        file_builder = file_builder.max_log_files(n);
    }

    let file_appender = file_builder
        .build(dir)
        .map_err(|e| AppError::Config(format!("failed to create log file in {dir}: {e}")))?;

    let (file_writer, guard) = non_blocking(file_appender);

    let _ = LOG_GUARD.set(guard);

    Ok(file_writer)
}
