use std::fs;
use std::path::{Path, PathBuf};

/// Temporary queue root for tests.
/// Writes files using the default layout (`queue/shogun_to_karo.yaml`,
/// `queue/tasks/`, `queue/reports/`, `dashboard.md`).
pub struct TempQueue {
  pub root: tempfile::TempDir,
}

impl Default for TempQueue {
  fn default() -> Self {
    Self::new()
  }
}

impl TempQueue {
  /// Empty root with the allow-listed directories created.
  pub fn new() -> Self {
    let root = tempfile::tempdir().expect("tempdir");
    for dir in ["queue", "projects", "config"] {
      fs::create_dir_all(root.path().join(dir)).expect("mkdir");
    }
    Self { root }
  }

  pub fn path(&self) -> PathBuf {
    self.root.path().to_path_buf()
  }

  /// Write `content` to `relative`, creating parent directories.
  pub fn write(&self, relative: impl AsRef<Path>, content: &str) -> PathBuf {
    let path = self.root.path().join(relative);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).expect("mkdir parent");
    }
    fs::write(&path, content).expect("write fixture");
    path
  }

  pub fn write_commands(&self, content: &str) -> PathBuf {
    self.write("queue/shogun_to_karo.yaml", content)
  }

  /// Write `queue/tasks/<agent>.yaml`.
  pub fn write_task(&self, agent: &str, content: &str) -> PathBuf {
    self.write(format!("queue/tasks/{agent}.yaml"), content)
  }

  /// Write `queue/reports/<agent>_report.yaml`.
  pub fn write_report(&self, agent: &str, content: &str) -> PathBuf {
    self.write(format!("queue/reports/{agent}_report.yaml"), content)
  }

  pub fn write_dashboard(&self, content: &str) -> PathBuf {
    self.write("dashboard.md", content)
  }
}

/// A small but complete queue resembling a live deployment.
pub fn sample_queue() -> TempQueue {
  let q = TempQueue::new();
  q.write_commands(
    r#"queue:
  - id: cmd_001
    timestamp: "2024-05-01T09:00:00+09:00"
    purpose: "Set up the dashboard backend"
    project: web
    priority: high
    status: done
  - id: cmd_002
    timestamp: "2024-05-02T10:00:00+09:00"
    purpose: "Add report listing"
    project: web
    status: in_progress
  - id: cmd_003
    timestamp: "2024-05-03T11:00:00+09:00"
    purpose: "Document the CLI"
    project: docs
    status: pending
  - id: cmd_004
    purpose: "Broken entry"
    status: exploded
"#,
  );
  q.write_task(
    "ashigaru1",
    r#"task:
  task_id: subtask_001a
  parent_cmd: cmd_002
  description: "Implement listing"
  status: assigned
  timestamp: "2024-05-02T10:05:00+09:00"
"#,
  );
  q.write_task(
    "ashigaru2",
    r#"tasks:
  - id: subtask_002a
    status: done
    updated_at: "2024-05-01T12:00:00Z"
  - id: subtask_002b
    status: blocked
"#,
  );
  q.write_report(
    "ashigaru1",
    r#"worker_id: ashigaru1
task_id: subtask_001a
timestamp: "2024-05-02T12:00:00+09:00"
status: in_progress
summary: "Listing half done"
"#,
  );
  q.write_report(
    "ashigaru2",
    r#"reports:
  - id: rep_002a
    status: done
    timestamp: "2024-05-01T13:00:00Z"
  - id: rep_002b
    status: failed
    timestamp: "2024-05-04T08:00:00Z"
"#,
  );
  q.write_dashboard(
    "# 📊 戦況報告\n\n## 🚨 要対応 - 殿のご判断をお待ちしております\n- approve release\n- choose hosting\n\n## 🔄 進行中\n- cmd_002\n",
  );
  q
}
