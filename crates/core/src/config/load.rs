use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::paths::{global_config_path, project_config_path};
use super::types::{Config, LayoutConfig, LogLevel, Result};
use super::validate::validate;

/// Load configuration by resolving the default global and project paths.
/// Project config overrides global; both override defaults.
pub fn load(root: Option<&Path>) -> Result<Config> {
  let global = global_config_path();
  let project = root.map(project_config_path);
  load_from_paths(global.as_deref(), project.as_deref())
}

/// Load configuration from explicit file paths (if present).
pub fn load_from_paths(global: Option<&Path>, project: Option<&Path>) -> Result<Config> {
  let mut cfg = Config::default();

  for path in [global, project].into_iter().flatten() {
    if let Ok(s) = fs::read_to_string(path) {
      let partial: PartialConfig = toml::from_str(&s)?;
      cfg = partial.merge_over(cfg);
    }
  }

  validate(&cfg)?;

  Ok(cfg)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
struct PartialLayoutConfig {
  pub commands_file: Option<PathBuf>,
  pub tasks_dir: Option<PathBuf>,
  pub reports_dir: Option<PathBuf>,
  pub summary_file: Option<PathBuf>,
}

impl PartialLayoutConfig {
  fn merge_over(self, base: LayoutConfig) -> LayoutConfig {
    LayoutConfig {
      commands_file: self.commands_file.unwrap_or(base.commands_file),
      tasks_dir: self.tasks_dir.unwrap_or(base.tasks_dir),
      reports_dir: self.reports_dir.unwrap_or(base.reports_dir),
      summary_file: self.summary_file.unwrap_or(base.summary_file),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
struct PartialConfig {
  pub log_level: Option<LogLevel>,
  pub log_path: Option<PathBuf>,
  pub action_required_marker: Option<String>,
  pub latest_reports_limit: Option<usize>,
  pub layout: Option<PartialLayoutConfig>,
}

impl PartialConfig {
  fn merge_over(self, base: Config) -> Config {
    let PartialConfig {
      log_level,
      log_path,
      action_required_marker,
      latest_reports_limit,
      layout,
    } = self;

    Config {
      log_level: log_level.unwrap_or(base.log_level),
      log_path: log_path.or(base.log_path),
      action_required_marker: action_required_marker.unwrap_or(base.action_required_marker),
      latest_reports_limit: latest_reports_limit.unwrap_or(base.latest_reports_limit),
      layout: layout.unwrap_or_default().merge_over(base.layout),
    }
  }
}
