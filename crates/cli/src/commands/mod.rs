mod dashboard;
mod listing;
mod read;

use serde::Serialize;
use serde_json::Value;
use shogun_core::QueueView;

use crate::args::Commands;
use crate::envelope::Envelope;

/// Run one subcommand against `view` and wrap the outcome in an envelope.
/// Read failures become envelope errors; only serialization failures escape.
pub fn execute(view: &QueueView, command: Commands) -> anyhow::Result<Envelope> {
  match command {
    Commands::Commands(args) => listing::commands(view, args),
    Commands::Command(args) => listing::command(view, &args.id),
    Commands::Tasks(args) => listing::tasks(view, args.agent.as_deref()),
    Commands::Reports(args) => listing::reports(view, args.agent.as_deref()),
    Commands::Dashboard => dashboard::dashboard(view),
    Commands::Read(args) => read::read(view, &args.path),
  }
}

fn source_root(view: &QueueView) -> String {
  view.root().display().to_string()
}

fn to_data<T: Serialize>(value: &T) -> anyhow::Result<Value> {
  Ok(serde_json::to_value(value)?)
}
