//! From YAML documents to validated records: extraction of record-like nodes
//! followed by per-candidate normalization. Invalid candidates are dropped
//! and logged at debug level; they never fail the document.

use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::adapters::fs::file_stem;
use crate::adapters::yaml::load_document;
use crate::domain::{Record, RecordKind};
use crate::error::Result;

pub mod extract;
pub mod normalize;

pub use extract::{Candidate, extract};
pub use normalize::{RejectReason, normalize};

/// Validated records of `kind` found in `doc`, in document order.
pub fn records_from_document(doc: &Value, kind: RecordKind, stem: &str) -> Vec<Record> {
  extract(doc, stem)
    .into_iter()
    .filter_map(|candidate| match normalize(&candidate.fields, kind, stem) {
      Ok(record) => {
        if candidate.synthesized_id {
          debug!(
            event = "record_synthesized",
            kind = ?kind,
            stem,
            "no tagged records; using whole document"
          );
        }
        Some(record)
      }
      Err(reason) => {
        debug!(
          event = "record_dropped",
          kind = ?kind,
          stem,
          reason = %reason,
          "dropped invalid record"
        );
        None
      }
    })
    .collect()
}

/// Load one file and return its valid records. A missing or empty file has
/// no records.
pub fn load_records(path: &Path, kind: RecordKind) -> Result<Vec<Record>> {
  let Some(doc) = load_document(path)? else {
    return Ok(Vec::new());
  };
  Ok(records_from_document(&doc, kind, &file_stem(path)))
}
