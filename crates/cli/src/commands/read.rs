use shogun_core::QueueView;
use tracing::info;

use super::{source_root, to_data};
use crate::envelope::Envelope;

pub fn read(view: &QueueView, relative: &str) -> anyhow::Result<Envelope> {
  let root = source_root(view);
  match view.read_raw(relative) {
    Ok(value) => Ok(Envelope::ok(to_data(&value)?, root)),
    Err(err) => {
      info!(
        event = "raw_read_failed",
        path = relative,
        code = %err.code(),
        "raw read failed"
      );
      Ok(Envelope::from_read_error(&err, root))
    }
  }
}
