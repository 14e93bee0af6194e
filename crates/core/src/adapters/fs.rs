use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::LayoutConfig;

/// Suffix stripped from a report file's stem when deriving its agent name.
pub const REPORT_SUFFIX: &str = "_report";

/// Absolute locations of the queue files under a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuePaths {
  root: PathBuf,
  layout: LayoutConfig,
}

impl QueuePaths {
  pub fn new(root: impl Into<PathBuf>, layout: LayoutConfig) -> Self {
    Self {
      root: root.into(),
      layout,
    }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn commands_file(&self) -> PathBuf {
    self.root.join(&self.layout.commands_file)
  }

  pub fn tasks_dir(&self) -> PathBuf {
    self.root.join(&self.layout.tasks_dir)
  }

  pub fn reports_dir(&self) -> PathBuf {
    self.root.join(&self.layout.reports_dir)
  }

  pub fn summary_file(&self) -> PathBuf {
    self.root.join(&self.layout.summary_file)
  }
}

/// List `.yaml`/`.yml` files directly inside `dir`, sorted by path.
/// A missing directory yields an empty list.
pub fn list_yaml_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
  let entries = match fs::read_dir(dir) {
    Ok(entries) => entries,
    Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
    Err(err) => return Err(err),
  };
  let mut files = Vec::new();
  for entry in entries {
    let path = entry?.path();
    if path.is_file() && has_yaml_extension(&path) {
      files.push(path);
    }
  }
  files.sort();
  Ok(files)
}

fn has_yaml_extension(path: &Path) -> bool {
  matches!(
    path.extension().and_then(|e| e.to_str()),
    Some("yaml" | "yml")
  )
}

/// File name without its extension, e.g. `ashigaru1_report` for
/// `reports/ashigaru1_report.yaml`.
pub fn file_stem(path: &Path) -> String {
  path
    .file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_default()
}

/// Agent name implied by a task or report file name.
pub fn agent_from_stem(stem: &str) -> &str {
  stem.strip_suffix(REPORT_SUFFIX).unwrap_or(stem)
}
