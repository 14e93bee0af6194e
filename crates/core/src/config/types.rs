use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::defaults;

/// Log level for the library and CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  Off,
  Warn,
  #[default]
  Info,
  Debug,
  Trace,
}

/// Where the queue files live, relative to the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
  /// Single YAML file holding the command chain
  pub commands_file: PathBuf,
  /// Directory with one task file per agent
  pub tasks_dir: PathBuf,
  /// Directory with one report file per agent (`<agent>_report.yaml`)
  pub reports_dir: PathBuf,
  /// Free-text markdown summary scanned for action-required items
  pub summary_file: PathBuf,
}

impl Default for LayoutConfig {
  fn default() -> Self {
    Self {
      commands_file: PathBuf::from(defaults::COMMANDS_FILE),
      tasks_dir: PathBuf::from(defaults::TASKS_DIR),
      reports_dir: PathBuf::from(defaults::REPORTS_DIR),
      summary_file: PathBuf::from(defaults::SUMMARY_FILE),
    }
  }
}

/// Effective configuration after merging defaults, global, and project config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  pub log_level: LogLevel,
  /// JSON log file; None means the platform default under the data dir
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub log_path: Option<PathBuf>,
  /// Heading text that marks an action-required section in the summary file
  pub action_required_marker: String,
  /// Number of reports shown on the dashboard (defaults to 5)
  pub latest_reports_limit: usize,
  pub layout: LayoutConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      log_level: LogLevel::Info,
      log_path: None,
      action_required_marker: defaults::ACTION_REQUIRED_MARKER.to_string(),
      latest_reports_limit: defaults::LATEST_REPORTS_LIMIT,
      layout: LayoutConfig::default(),
    }
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("toml: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("layout.{key} must be a non-empty relative path, got `{}`", path.display())]
  InvalidLayoutPath { key: &'static str, path: PathBuf },
  #[error("action_required_marker must not be empty")]
  EmptyMarker,
  #[error("latest_reports_limit must be at least 1")]
  ZeroReportsLimit,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
