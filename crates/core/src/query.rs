use std::io;
use std::path::Path;

use serde::Serialize;
use serde_yaml::Value;
use tracing::debug;

use crate::adapters::fs::QueuePaths;
use crate::adapters::guard::PathGuard;
use crate::adapters::yaml::load_mapping_or_empty;
use crate::aggregate;
use crate::config::Config;
use crate::domain::{DashboardSummary, Record, Status};
use crate::error::{ReadError, Result};

pub const DEFAULT_PAGE_LIMIT: usize = 50;
pub const MAX_PAGE_LIMIT: usize = 200;

/// Limit/offset window over a filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub limit: usize,
  pub offset: usize,
}

impl Default for PageRequest {
  fn default() -> Self {
    Self {
      limit: DEFAULT_PAGE_LIMIT,
      offset: 0,
    }
  }
}

impl PageRequest {
  /// Limit clamped to `1..=MAX_PAGE_LIMIT`.
  pub fn new(limit: usize, offset: usize) -> Self {
    Self {
      limit: limit.clamp(1, MAX_PAGE_LIMIT),
      offset,
    }
  }

  pub fn apply<T>(self, items: Vec<T>) -> Page<T> {
    let total = items.len();
    let items = items
      .into_iter()
      .skip(self.offset)
      .take(self.limit)
      .collect();
    Page {
      items,
      total,
      limit: self.limit,
      offset: self.offset,
    }
  }
}

/// One window of results plus the size of the unpaginated list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub total: usize,
  pub limit: usize,
  pub offset: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandFilter {
  pub status: Option<Status>,
  pub project: Option<String>,
  pub page: PageRequest,
}

impl CommandFilter {
  fn matches(&self, record: &Record) -> bool {
    self.status.is_none_or(|status| record.status == Some(status))
      && self
        .project
        .as_deref()
        .is_none_or(|project| record.project() == Some(project))
  }
}

/// Read-only queries over one queue root.
///
/// Every call reads the files afresh; the view holds no cached state, so a
/// single instance can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct QueueView {
  paths: QueuePaths,
  guard: PathGuard,
  action_required_marker: String,
  latest_reports_limit: usize,
}

impl QueueView {
  pub fn new(root: &Path, config: &Config) -> io::Result<Self> {
    let guard = PathGuard::new(root)?;
    let paths = QueuePaths::new(guard.root(), config.layout.clone());
    Ok(Self {
      paths,
      guard,
      action_required_marker: config.action_required_marker.clone(),
      latest_reports_limit: config.latest_reports_limit,
    })
  }

  /// Canonical root every query reads under.
  pub fn root(&self) -> &Path {
    self.guard.root()
  }

  pub fn paths(&self) -> &QueuePaths {
    &self.paths
  }

  /// Commands in file order, filtered then paginated.
  pub fn commands(&self, filter: &CommandFilter) -> Page<Record> {
    let matching: Vec<Record> = aggregate::load_commands(&self.paths)
      .into_iter()
      .filter(|record| filter.matches(record))
      .collect();
    debug!(event = "commands_listed", total = matching.len(), "listed commands");
    filter.page.apply(matching)
  }

  /// First command with the given id.
  pub fn command(&self, id: &str) -> Option<Record> {
    aggregate::load_commands(&self.paths)
      .into_iter()
      .find(|record| record.id == id)
  }

  /// Tasks in file order, optionally limited to one agent.
  pub fn tasks(&self, agent: Option<&str>) -> Result<Vec<Record>> {
    let tasks = aggregate::load_tasks(&self.paths)?;
    Ok(filter_agent(tasks, agent))
  }

  /// Reports newest first, optionally limited to one agent.
  pub fn reports(&self, agent: Option<&str>) -> Result<Vec<Record>> {
    let mut reports = filter_agent(aggregate::load_reports(&self.paths)?, agent);
    aggregate::sort_newest_first(&mut reports);
    Ok(reports)
  }

  /// Summary over every source; unreadable sources count as empty.
  pub fn dashboard(&self) -> DashboardSummary {
    aggregate::dashboard_summary(
      &self.paths,
      &self.action_required_marker,
      self.latest_reports_limit,
    )
  }

  /// Parsed contents of any YAML file under the allow-listed directories.
  /// An empty document reads as an empty mapping.
  pub fn read_raw(&self, relative: &str) -> Result<Value> {
    let path = self.guard.resolve(relative)?;
    load_mapping_or_empty(&path)?.ok_or_else(|| ReadError::FileNotFound {
      path: relative.to_string(),
    })
  }
}

fn filter_agent(records: Vec<Record>, agent: Option<&str>) -> Vec<Record> {
  match agent {
    Some(agent) => records
      .into_iter()
      .filter(|record| record.agent() == Some(agent))
      .collect(),
    None => records,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn page_request_clamps_limit() {
    assert_eq!(PageRequest::new(0, 3), PageRequest { limit: 1, offset: 3 });
    assert_eq!(PageRequest::new(1000, 0).limit, MAX_PAGE_LIMIT);
    assert_eq!(PageRequest::default().limit, DEFAULT_PAGE_LIMIT);
  }

  #[test]
  fn page_reports_unpaginated_total() {
    let page = PageRequest::new(2, 1).apply(vec![1, 2, 3, 4]);
    assert_eq!(page.items, vec![2, 3]);
    assert_eq!(page.total, 4);

    let past_end = PageRequest::new(10, 9).apply(vec![1, 2]);
    assert!(past_end.items.is_empty());
    assert_eq!(past_end.total, 2);
  }
}
