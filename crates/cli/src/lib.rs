pub mod args;
pub mod commands;
pub mod envelope;

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use shogun_core::{QueueView, config, logging};
use tracing::debug;

use crate::envelope::Envelope;

pub fn run() -> anyhow::Result<ExitCode> {
  // If no additional args, show help and exit 0
  if std::env::args_os().len() == 1 {
    args::Cli::print_help();
    return Ok(ExitCode::SUCCESS);
  }

  // Parse arguments; this will also handle --help/--version.
  let cli = args::Cli::parse();
  let Some(command) = cli.command else {
    args::Cli::print_help();
    return Ok(ExitCode::SUCCESS);
  };

  let cwd = std::env::current_dir().context("cannot determine current directory")?;
  let root = config::discover_root(cli.root.as_deref(), &cwd);
  let cfg = config::load(Some(&root))
    .with_context(|| format!("invalid configuration for root {}", root.display()))?;

  let log_path = cfg.log_path.clone().unwrap_or_else(config::default_log_path);
  if let Err(err) = logging::init(&log_path, cfg.log_level) {
    eprintln!(
      "shogun-view: logging disabled, cannot open {}: {err}",
      log_path.display()
    );
  }

  let outcome = serve(&root, &cfg, command, cli.compact);
  logging::shutdown();
  outcome
}

fn serve(
  root: &Path,
  cfg: &config::Config,
  command: args::Commands,
  compact: bool,
) -> anyhow::Result<ExitCode> {
  let view = QueueView::new(root, cfg)
    .with_context(|| format!("cannot open queue root {}", root.display()))?;
  debug!(event = "command_started", command = ?command, root = %view.root().display());

  let envelope = commands::execute(&view, command)?;
  print_envelope(&envelope, compact)?;
  Ok(if envelope.is_error() {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  })
}

fn print_envelope(envelope: &Envelope, compact: bool) -> anyhow::Result<()> {
  let text = if compact {
    serde_json::to_string(envelope)?
  } else {
    serde_json::to_string_pretty(envelope)?
  };
  let mut out = io::stdout().lock();
  writeln!(out, "{text}").context("cannot write to stdout")?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::{CommandFactory, Parser, error::ErrorKind};

  #[test]
  fn help_flag_triggers_displayhelp() {
    // Using try_parse_from to capture the help behavior without exiting the process.
    let err = args::Cli::try_parse_from(["shogun-view", "--help"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayHelp);
  }

  #[test]
  fn version_flag_triggers_displayversion() {
    let err = args::Cli::try_parse_from(["shogun-view", "--version"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
  }

  #[test]
  fn command_factory_builds() {
    args::Cli::command().debug_assert();
  }

  #[test]
  fn unknown_status_is_rejected_at_parse_time() {
    let err =
      args::Cli::try_parse_from(["shogun-view", "commands", "--status", "exploded"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
  }

  #[test]
  fn global_flags_work_after_subcommand() {
    let cli =
      args::Cli::try_parse_from(["shogun-view", "tasks", "ashigaru1", "--root", "/q", "--compact"])
        .unwrap();
    assert!(cli.compact);
    assert_eq!(cli.root.as_deref(), Some(std::path::Path::new("/q")));
    assert!(matches!(
      cli.command,
      Some(args::Commands::Tasks(args::AgentArgs { agent: Some(ref a) })) if a == "ashigaru1"
    ));
  }
}
