use std::env;
use std::path::{Path, PathBuf};

/// Environment variable pointing at the queue root.
pub const ROOT_ENV: &str = "SHOGUN_VIEW_ROOT";

/// Location of the global config file (~/.config/shogun-view/config.toml)
pub fn global_config_path() -> Option<PathBuf> {
  dirs::config_dir().map(|p| p.join("shogun-view").join("config.toml"))
}

/// Location of the project config file (<root>/config/shogun-view.toml)
pub fn project_config_path(root: &Path) -> PathBuf {
  root.join("config").join("shogun-view.toml")
}

/// Default JSON log file under the platform data dir, falling back to the
/// system temp dir.
pub fn default_log_path() -> PathBuf {
  dirs::data_local_dir()
    .unwrap_or_else(env::temp_dir)
    .join("shogun-view")
    .join("logs.jsonl")
}

/// Resolve the queue root: an explicit path wins, then `SHOGUN_VIEW_ROOT`,
/// then the nearest ancestor of `cwd` containing a `queue/` directory, then
/// `cwd` itself.
pub fn discover_root(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
  let env_root = env::var_os(ROOT_ENV)
    .filter(|v| !v.is_empty())
    .map(PathBuf::from);
  discover_root_with(explicit, env_root, cwd)
}

pub(crate) fn discover_root_with(
  explicit: Option<&Path>,
  env_root: Option<PathBuf>,
  cwd: &Path,
) -> PathBuf {
  if let Some(root) = explicit {
    return root.to_path_buf();
  }
  if let Some(root) = env_root {
    return root;
  }
  cwd
    .ancestors()
    .find(|dir| dir.join("queue").is_dir())
    .unwrap_or(cwd)
    .to_path_buf()
}
