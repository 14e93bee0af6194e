use serde_json::json;
use shogun_core::{CommandFilter, PageRequest, QueueView};

use super::{source_root, to_data};
use crate::args::CommandsArgs;
use crate::envelope::{Envelope, NOT_FOUND};

pub fn commands(view: &QueueView, args: CommandsArgs) -> anyhow::Result<Envelope> {
  let filter = CommandFilter {
    status: args.status,
    project: args.project,
    page: PageRequest::new(args.limit, args.offset),
  };
  let page = view.commands(&filter);
  Ok(
    Envelope::ok(to_data(&page.items)?, source_root(view))
      .with_page(page.total, page.limit, page.offset),
  )
}

pub fn command(view: &QueueView, id: &str) -> anyhow::Result<Envelope> {
  let root = source_root(view);
  match view.command(id) {
    Some(record) => Ok(Envelope::ok(to_data(&record)?, root)),
    None => Ok(Envelope::failure(
      NOT_FOUND,
      format!("command not found: {id}"),
      json!({ "id": id }),
      root,
    )),
  }
}

pub fn tasks(view: &QueueView, agent: Option<&str>) -> anyhow::Result<Envelope> {
  let root = source_root(view);
  match view.tasks(agent) {
    Ok(tasks) => Ok(Envelope::ok(to_data(&tasks)?, root).with_total(tasks.len())),
    Err(err) => Ok(Envelope::from_read_error(&err, root)),
  }
}

pub fn reports(view: &QueueView, agent: Option<&str>) -> anyhow::Result<Envelope> {
  let root = source_root(view);
  match view.reports(agent) {
    Ok(reports) => Ok(Envelope::ok(to_data(&reports)?, root).with_total(reports.len())),
    Err(err) => Ok(Envelope::from_read_error(&err, root)),
  }
}
