// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::config::APP_NAME;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILTER_ENV: &str = "ALUMNI_LOG";
const DEFAULT_FILTER: &str = "info";

/// The terminal belongs to the TUI, so every event goes to an append-only
/// file through a background writer. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init() -> Result<(PathBuf, WorkerGuard)> {
    let path = log_path()?;
    let (writer, guard) = file_writer(&path)?;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .context("install log subscriber")?;
    Ok((path, guard))
}

fn file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| {
            format!(
                "open log file {} -- set ALUMNI_LOG_FILE to log elsewhere",
                path.display()
            )
        })?;
    Ok(tracing_appender::non_blocking(file))
}

pub fn log_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os("ALUMNI_LOG_FILE") {
        return Ok(PathBuf::from(path));
    }
    let data_dir = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set ALUMNI_LOG_FILE to the log file")
    })?;
    Ok(data_dir.join(APP_NAME).join(format!("{APP_NAME}.log")))
}

#[cfg(test)]
mod tests {
    use super::{file_writer, log_path};
    use crate::env_lock;
    use anyhow::Result;
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn file_writer_creates_parent_and_flushes_on_guard_drop() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("alumni.log");

        let (mut writer, guard) = file_writer(&path)?;
        writer.write_all(b"first line\n")?;
        drop(writer);
        drop(guard);
        assert_eq!(fs::read_to_string(&path)?, "first line\n");

        let (mut writer, guard) = file_writer(&path)?;
        writer.write_all(b"second line\n")?;
        drop(writer);
        drop(guard);
        assert_eq!(fs::read_to_string(&path)?, "first line\nsecond line\n");
        Ok(())
    }

    #[test]
    fn log_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("ALUMNI_LOG_FILE", "/var/tmp/alumni-test.log");
        }
        let resolved = log_path();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("ALUMNI_LOG_FILE");
        }
        assert_eq!(resolved?, PathBuf::from("/var/tmp/alumni-test.log"));
        Ok(())
    }

    #[test]
    fn default_log_path_lives_under_app_dir() {
        let _guard = env_lock();
        if let Ok(path) = log_path() {
            assert!(path.ends_with("alumni/alumni.log"), "got {}", path.display());
        }
    }
}
