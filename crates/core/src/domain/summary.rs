use serde::Serialize;

use super::record::Record;

/// Aggregated view over the whole queue, rebuilt on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
  /// Commands and tasks whose status is in the in-progress class.
  pub in_progress_count: usize,
  /// Commands and tasks marked `done`.
  pub done_count: usize,
  /// Bullet items under "action required" headings of the summary document.
  pub action_required_count: usize,
  /// Latest timestamp across commands, tasks and reports.
  pub latest_updated_at: Option<String>,
  /// Most recent reports, newest first.
  pub latest_reports: Vec<Record>,
}
