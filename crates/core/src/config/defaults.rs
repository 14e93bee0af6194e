pub(crate) const COMMANDS_FILE: &str = "queue/shogun_to_karo.yaml";
pub(crate) const TASKS_DIR: &str = "queue/tasks";
pub(crate) const REPORTS_DIR: &str = "queue/reports";
pub(crate) const SUMMARY_FILE: &str = "dashboard.md";

pub(crate) const ACTION_REQUIRED_MARKER: &str = "要対応";
pub(crate) const LATEST_REPORTS_LIMIT: usize = 5;
