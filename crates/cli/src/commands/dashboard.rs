use shogun_core::QueueView;

use super::{source_root, to_data};
use crate::envelope::Envelope;

pub fn dashboard(view: &QueueView) -> anyhow::Result<Envelope> {
  let summary = view.dashboard();
  Ok(Envelope::ok(to_data(&summary)?, source_root(view)))
}
