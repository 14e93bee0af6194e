//! Cross-file aggregation: record collections per kind, the dashboard
//! summary, and the action-required count from the summary document.

use std::fs;
use std::io;
use std::path::Path;
use std::thread;

use tracing::{info, warn};

use crate::adapters::fs::{QueuePaths, list_yaml_files};
use crate::domain::{DashboardSummary, Record, RecordKind, Status, Timestamp};
use crate::error::{ReadError, Result};
use crate::ingest::load_records;

/// Heading prefix that opens a section in the summary document.
const HEADING_PREFIX: &str = "##";

/// Commands from the commands file, in file order.
pub fn load_commands(paths: &QueuePaths) -> Vec<Record> {
  load_or_skip(&paths.commands_file(), RecordKind::Command)
}

/// Tasks from every file of the tasks directory, ordered by file path.
pub fn load_tasks(paths: &QueuePaths) -> Result<Vec<Record>> {
  load_dir(&paths.tasks_dir(), RecordKind::Task)
}

/// Reports from every file of the reports directory, ordered by file path.
pub fn load_reports(paths: &QueuePaths) -> Result<Vec<Record>> {
  load_dir(&paths.reports_dir(), RecordKind::Report)
}

fn load_dir(dir: &Path, kind: RecordKind) -> Result<Vec<Record>> {
  let files = list_yaml_files(dir).map_err(|source| ReadError::FileRead {
    path: dir.to_path_buf(),
    source,
  })?;
  Ok(
    files
      .iter()
      .flat_map(|path| load_or_skip(path, kind))
      .collect(),
  )
}

/// A file that cannot be read or parsed contributes nothing.
fn load_or_skip(path: &Path, kind: RecordKind) -> Vec<Record> {
  match load_records(path, kind) {
    Ok(records) => records,
    Err(err) => {
      warn!(
        event = "document_skipped",
        path = %path.display(),
        code = %err.code(),
        error = %err,
        "skipping unreadable document"
      );
      Vec::new()
    }
  }
}

/// Latest timestamp across `records` as ISO-8601, or None when no record
/// carries one.
pub fn latest_timestamp<'a, I>(records: I) -> Option<String>
where
  I: IntoIterator<Item = &'a Record>,
{
  records
    .into_iter()
    .filter_map(|record| record.timestamp.as_ref())
    .max()
    .map(Timestamp::to_iso8601)
}

/// Sort newest first; records without a timestamp go last. Stable.
pub fn sort_newest_first(records: &mut [Record]) {
  records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Count bullet lines (`-` or `*`) inside `##` sections whose heading
/// contains `marker`.
pub fn count_action_required(text: &str, marker: &str) -> usize {
  let mut in_section = false;
  let mut count = 0;
  for line in text.lines() {
    let line = line.trim_start();
    if line.starts_with(HEADING_PREFIX) {
      in_section = line.contains(marker);
    } else if in_section && (line.starts_with('-') || line.starts_with('*')) {
      count += 1;
    }
  }
  count
}

/// [`count_action_required`] over a file; a missing or unreadable file
/// counts zero.
pub fn count_action_required_in(path: &Path, marker: &str) -> usize {
  match fs::read_to_string(path) {
    Ok(text) => count_action_required(&text, marker),
    Err(err) if err.kind() == io::ErrorKind::NotFound => 0,
    Err(err) => {
      warn!(
        event = "summary_unreadable",
        path = %path.display(),
        error = %err,
        "cannot read summary document"
      );
      0
    }
  }
}

/// Build the dashboard summary. The four reads run concurrently; a source
/// that cannot be read contributes nothing instead of failing the summary.
pub fn dashboard_summary(paths: &QueuePaths, marker: &str, reports_limit: usize) -> DashboardSummary {
  let (commands, tasks, reports, action_required_count) = thread::scope(|s| {
    let commands = s.spawn(|| load_commands(paths));
    let tasks = s.spawn(|| load_tasks(paths));
    let reports = s.spawn(|| load_reports(paths));
    let action = s.spawn(|| count_action_required_in(&paths.summary_file(), marker));
    (
      join(commands),
      join(tasks),
      join(reports),
      join(action),
    )
  });
  let tasks = or_empty(tasks, &paths.tasks_dir());
  let mut reports = or_empty(reports, &paths.reports_dir());

  let work = || commands.iter().chain(&tasks);
  let in_progress_count = work()
    .filter(|r| r.status.is_some_and(Status::is_in_progress))
    .count();
  let done_count = work()
    .filter(|r| r.status.is_some_and(Status::is_done))
    .count();
  let latest_updated_at = latest_timestamp(work().chain(&reports));

  sort_newest_first(&mut reports);
  reports.truncate(reports_limit);

  info!(
    event = "dashboard_built",
    commands = commands.len(),
    tasks = tasks.len(),
    in_progress_count,
    done_count,
    action_required_count,
    "dashboard summary built"
  );

  DashboardSummary {
    in_progress_count,
    done_count,
    action_required_count,
    latest_updated_at,
    latest_reports: reports,
  }
}

fn or_empty(loaded: Result<Vec<Record>>, dir: &Path) -> Vec<Record> {
  loaded.unwrap_or_else(|err| {
    warn!(
      event = "directory_skipped",
      path = %dir.display(),
      code = %err.code(),
      error = %err,
      "skipping unreadable directory"
    );
    Vec::new()
  })
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
  handle
    .join()
    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
}
