use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use crate::config::LogLevel;
use tracing::{info, subscriber::set_global_default};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

static WORKER_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// Initialize structured JSON logging to the given `logs.jsonl` path.
/// Subsequent calls are no-ops for the subscriber (the `set_global_default`
/// error is ignored). Creates the parent directory if needed. Call
/// [`shutdown`] before the process exits to flush buffered lines.
pub fn init(logs_path: &Path, level: LogLevel) -> io::Result<()> {
  if let Some(parent) = logs_path.parent() {
    fs::create_dir_all(parent)?;
  }

  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(logs_path)?;

  // Non-blocking writer so reads never stall on log IO. Keep guard alive globally.
  let (nb_writer, guard) = tracing_appender::non_blocking(file);
  if let Ok(mut slot) = WORKER_GUARD.lock()
    && slot.is_none()
  {
    *slot = Some(guard);
  }

  let filter = EnvFilter::new(filter_directive(level));

  let json_layer = fmt::layer()
    .with_timer(ChronoUtc::rfc_3339())
    .json()
    .with_current_span(true)
    .with_span_list(true)
    .with_level(true)
    .with_target(false)
    .with_thread_ids(false)
    .with_thread_names(false)
    .with_writer(move || nb_writer.clone());

  let subscriber = Registry::default().with(filter).with(json_layer);

  // Ignore error if already set
  let _ = set_global_default(subscriber);

  info!(
    event = "logging_initialized",
    logs_path = %logs_path.display(),
    level = ?level,
    "logging initialized"
  );
  Ok(())
}

/// Flush and stop the background log writer. Later events are discarded.
pub fn shutdown() {
  if let Ok(mut slot) = WORKER_GUARD.lock() {
    slot.take();
  }
}

fn filter_directive(level: LogLevel) -> &'static str {
  match level {
    LogLevel::Off => "off",
    LogLevel::Warn => "warn",
    LogLevel::Info => "info",
    LogLevel::Debug => "debug",
    LogLevel::Trace => "trace",
  }
}
