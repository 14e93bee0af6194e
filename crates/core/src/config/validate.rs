use std::path::{Component, Path};

use super::types::{Config, ConfigError, Result};

pub(super) fn validate(cfg: &Config) -> Result<()> {
  let layout = &cfg.layout;
  for (key, path) in [
    ("commands_file", &layout.commands_file),
    ("tasks_dir", &layout.tasks_dir),
    ("reports_dir", &layout.reports_dir),
    ("summary_file", &layout.summary_file),
  ] {
    if !is_plain_relative(path) {
      return Err(ConfigError::InvalidLayoutPath {
        key,
        path: path.clone(),
      });
    }
  }

  if cfg.action_required_marker.trim().is_empty() {
    return Err(ConfigError::EmptyMarker);
  }
  if cfg.latest_reports_limit == 0 {
    return Err(ConfigError::ZeroReportsLimit);
  }

  Ok(())
}

/// Relative, non-empty, and free of `..` so layout entries stay under the root.
fn is_plain_relative(path: &Path) -> bool {
  path.components().next().is_some()
    && path
      .components()
      .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
