use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use thiserror::Error;

use super::timestamp::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
  Idle,
  Assigned,
  Done,
  Failed,
  Pending,
  PendingBlocked,
  InProgress,
  Blocked,
  Todo,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported status: {0}")]
pub struct UnknownStatus(pub String);

impl Status {
  pub const ALL: [Status; 9] = [
    Status::Idle,
    Status::Assigned,
    Status::Done,
    Status::Failed,
    Status::Pending,
    Status::PendingBlocked,
    Status::InProgress,
    Status::Blocked,
    Status::Todo,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Status::Idle => "idle",
      Status::Assigned => "assigned",
      Status::Done => "done",
      Status::Failed => "failed",
      Status::Pending => "pending",
      Status::PendingBlocked => "pending_blocked",
      Status::InProgress => "in_progress",
      Status::Blocked => "blocked",
      Status::Todo => "todo",
    }
  }

  /// Work that has been handed out but not finished.
  pub fn is_in_progress(self) -> bool {
    matches!(
      self,
      Status::Assigned | Status::InProgress | Status::Pending | Status::PendingBlocked
    )
  }

  pub fn is_done(self) -> bool {
    self == Status::Done
  }
}

impl FromStr for Status {
  type Err = UnknownStatus;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Status::ALL
      .into_iter()
      .find(|status| status.as_str() == s)
      .ok_or_else(|| UnknownStatus(s.to_string()))
  }
}

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
  Command,
  Task,
  Report,
}

impl RecordKind {
  /// Whether records of this kind carry an `agent` field.
  pub fn has_agent(self) -> bool {
    matches!(self, RecordKind::Task | RecordKind::Report)
  }
}

/// Fields specific to one record kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Details {
  Command {
    project: Option<String>,
    purpose: Option<String>,
  },
  Task {
    agent: Option<String>,
  },
  Report {
    agent: Option<String>,
  },
}

/// A validated command, task or report.
///
/// Fields not modelled here are kept verbatim in `extra`, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
  pub id: String,
  pub status: Option<Status>,
  pub timestamp: Option<Timestamp>,
  #[serde(flatten)]
  pub details: Details,
  #[serde(flatten)]
  pub extra: Mapping,
}

impl Record {
  pub fn kind(&self) -> RecordKind {
    match self.details {
      Details::Command { .. } => RecordKind::Command,
      Details::Task { .. } => RecordKind::Task,
      Details::Report { .. } => RecordKind::Report,
    }
  }

  pub fn agent(&self) -> Option<&str> {
    match &self.details {
      Details::Task { agent } | Details::Report { agent } => agent.as_deref(),
      Details::Command { .. } => None,
    }
  }

  pub fn project(&self) -> Option<&str> {
    match &self.details {
      Details::Command { project, .. } => project.as_deref(),
      _ => None,
    }
  }

  pub fn purpose(&self) -> Option<&str> {
    match &self.details {
      Details::Command { purpose, .. } => purpose.as_deref(),
      _ => None,
    }
  }

  /// Look up a preserved extra field by name.
  pub fn extra_field(&self, key: &str) -> Option<&serde_yaml::Value> {
    self.extra.get(key)
  }
}
