use std::path::PathBuf;

use clap::{Args as ClapArgs, CommandFactory, Parser, Subcommand};
use shogun_core::domain::Status;
use shogun_core::query::DEFAULT_PAGE_LIMIT;

#[derive(Debug, Parser)]
#[command(
  version,
  about = "Read-only view over a YAML agent task queue",
  long_about = None,
  bin_name = "shogun-view"
)]
pub struct Cli {
  /// Queue root (defaults to $SHOGUN_VIEW_ROOT or the nearest ancestor with a queue/ dir)
  #[arg(long, global = true, value_name = "DIR")]
  pub root: Option<PathBuf>,
  /// Print the envelope on a single line
  #[arg(long, global = true)]
  pub compact: bool,
  #[command(subcommand)]
  pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  /// List commands from the commands file
  Commands(CommandsArgs),
  /// Show a single command by id
  Command(CommandArgs),
  /// List tasks, optionally for one agent
  Tasks(AgentArgs),
  /// List reports newest first, optionally for one agent
  Reports(AgentArgs),
  /// Show the dashboard summary
  Dashboard,
  /// Read a YAML file under queue/, projects/ or config/
  Read(ReadArgs),
}

#[derive(Debug, ClapArgs)]
pub struct CommandsArgs {
  /// Only commands with this status
  #[arg(long)]
  pub status: Option<Status>,
  /// Only commands for this project
  #[arg(long)]
  pub project: Option<String>,
  /// Page size (clamped to 1..=200)
  #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
  pub limit: usize,
  /// Number of matching commands to skip
  #[arg(long, default_value_t = 0)]
  pub offset: usize,
}

#[derive(Debug, ClapArgs)]
pub struct CommandArgs {
  /// Command id, e.g. cmd_001
  pub id: String,
}

#[derive(Debug, ClapArgs)]
pub struct AgentArgs {
  /// Agent name, e.g. ashigaru1
  pub agent: Option<String>,
}

#[derive(Debug, ClapArgs)]
pub struct ReadArgs {
  /// Path relative to the queue root
  pub path: String,
}

impl Cli {
  pub fn print_help() {
    let mut cmd = Cli::command();
    // Nothing useful to do if stdout is gone.
    let _ = cmd.print_help();
    println!();
  }
}
