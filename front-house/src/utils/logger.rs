//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments
//! Features:
//! - Daily rotating application logs (pruned by [`cleanup_old_logs`])
//! - Audit logs for revenue-affecting operations (never pruned)
//! - Security logs for failed logins and refused actions (never pruned)

use crate::core::Config;
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, Layer, Registry, filter::filter_fn, fmt, prelude::*};

pub const AUDIT_TARGET: &str = "audit";
pub const SECURITY_TARGET: &str = "security";

const APP_LOG_PREFIX: &str = "app";

/// Default retention for application logs
pub const DEFAULT_KEEP_DAYS: i64 = 14;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Delete application log files older than `keep_days`
///
/// The rolling appender names files `app.YYYY-MM-DD`; audit and security
/// logs live in their own subdirectories and are left alone.
/// Returns the number of deleted files.
pub fn cleanup_old_logs(log_dir: &Path, keep_days: i64) -> anyhow::Result<usize> {
    let app_log_dir = log_dir.join(APP_LOG_PREFIX);
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let cutoff = Local::now().date_naive() - chrono::Duration::days(keep_days);
    let mut deleted = 0;

    for entry in fs::read_dir(&app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(date_part) = name
            .strip_prefix(APP_LOG_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
        else {
            continue;
        };
        if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            deleted += 1;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(deleted)
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn format_layer<W>(json_format: bool, ansi: bool, writer: W) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(ansi)
        .with_writer(writer);
    if json_format {
        layer.json().with_current_span(true).boxed()
    } else {
        layer.boxed()
    }
}

fn rolling_appender(dir: &Path, prefix: &str) -> anyhow::Result<RollingFileAppender> {
    fs::create_dir_all(dir)?;
    Ok(RollingFileAppender::new(Rotation::DAILY, dir, prefix))
}

/// Initialize the logging system with daily rotating logs
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn"); `RUST_LOG` wins when set
/// * `json_format` - Whether to use JSON format (true for production, false for development)
/// * `log_dir` - Optional directory for file logging (e.g., Some("./work_dir/logs"))
///
/// # Examples
/// ```no_run
/// use front_house::init_logger_with_file;
/// use std::path::Path;
///
/// // Development setup (console only)
/// init_logger_with_file("debug", false, None)?;
///
/// // Production setup (console + file)
/// init_logger_with_file("info", true, Some(Path::new("./work_dir/logs")))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    // Console layer
    layers.push(
        format_layer(json_format, !json_format, std::io::stdout)
            .with_filter(env_filter(level))
            .boxed(),
    );

    if let Some(log_dir) = log_dir {
        // Application logs: everything except audit/security targets
        let app_log = rolling_appender(&log_dir.join(APP_LOG_PREFIX), APP_LOG_PREFIX)?;
        layers.push(
            format_layer(json_format, false, std::sync::Mutex::new(app_log))
                .with_filter(filter_fn(|meta| {
                    meta.target() != AUDIT_TARGET && meta.target() != SECURITY_TARGET
                }))
                .with_filter(env_filter(level))
                .boxed(),
        );

        // Audit logs
        let audit_log = rolling_appender(&log_dir.join(AUDIT_TARGET), AUDIT_TARGET)?;
        layers.push(
            format_layer(json_format, false, std::sync::Mutex::new(audit_log))
                .with_filter(filter_fn(|meta| meta.target() == AUDIT_TARGET))
                .boxed(),
        );

        // Security logs
        let security_log = rolling_appender(&log_dir.join(SECURITY_TARGET), SECURITY_TARGET)?;
        layers.push(
            format_layer(json_format, false, std::sync::Mutex::new(security_log))
                .with_filter(filter_fn(|meta| meta.target() == SECURITY_TARGET))
                .boxed(),
        );
    }

    tracing_subscriber::registry().with(layers).try_init()?;
    Ok(())
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Console + file logging under `config.log_dir()`, then prune old app logs
pub fn init_logger_from_config(config: &Config) -> anyhow::Result<()> {
    let log_dir = config.log_dir();
    init_logger_with_file(&config.log_level, config.log_json, Some(&log_dir))?;
    let deleted = cleanup_old_logs(&log_dir, DEFAULT_KEEP_DAYS)?;
    if deleted > 0 {
        tracing::info!(deleted = deleted, "Pruned old application logs");
    }
    Ok(())
}

/// Audit log helper - records revenue-affecting operations
///
/// # Examples
/// ```ignore
/// audit_log!("u1", "ledger_post", "table:t3", "22.00");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($user_id:expr, $action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            user_id = $user_id,
            action = $action,
            resource = $resource,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
    ($user_id:expr, $action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            user_id = $user_id,
            action = $action,
            resource = $resource,
            details = $details,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}

/// Security log helper - failed logins, refused actions
///
/// # Examples
/// ```ignore
/// security_log!(WARN, "auth_failed", email = %email);
/// ```
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(
            target: "security",
            event = $event,
            timestamp = chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(
            target: "security",
            event = $event,
            timestamp = chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"log").unwrap();
    }

    #[test]
    fn test_cleanup_removes_only_expired_app_logs() {
        let root = tempfile::tempdir().unwrap();
        let app_dir = root.path().join("app");
        let audit_dir = root.path().join("audit");
        fs::create_dir_all(&app_dir).unwrap();
        fs::create_dir_all(&audit_dir).unwrap();

        let today = Local::now().date_naive();
        let old = (today - chrono::Duration::days(30)).format("%Y-%m-%d");
        let recent = (today - chrono::Duration::days(2)).format("%Y-%m-%d");

        touch(&app_dir, &format!("app.{}", old));
        touch(&app_dir, &format!("app.{}", recent));
        touch(&app_dir, "notes.txt");
        touch(&audit_dir, &format!("audit.{}", old));

        let deleted = cleanup_old_logs(root.path(), DEFAULT_KEEP_DAYS).unwrap();
        assert_eq!(deleted, 1);
        assert!(!app_dir.join(format!("app.{}", old)).exists());
        assert!(app_dir.join(format!("app.{}", recent)).exists());
        assert!(app_dir.join("notes.txt").exists());
        assert!(audit_dir.join(format!("audit.{}", old)).exists());
    }

    #[test]
    fn test_cleanup_without_app_dir() {
        let root = tempfile::tempdir().unwrap();
        assert_eq!(cleanup_old_logs(root.path(), 7).unwrap(), 0);
    }
}
