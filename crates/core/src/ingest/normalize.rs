use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::adapters::fs::agent_from_stem;
use crate::domain::{Details, Record, RecordKind, Status, Timestamp, UnknownStatus};

use super::extract::ID_KEY;

/// Timestamp sources in priority order.
const TIMESTAMP_KEYS: [&str; 3] = ["timestamp", "updated_at", "created_at"];

/// Why a candidate was left out of the results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
  #[error("missing id")]
  MissingId,
  #[error("id must not be blank")]
  BlankId,
  #[error("field `{field}` has an unsupported type")]
  WrongType { field: &'static str },
  #[error(transparent)]
  Status(#[from] UnknownStatus),
  #[error("invalid timestamp: {0}")]
  InvalidTimestamp(String),
  #[error("mapping key must be a scalar")]
  NonScalarKey,
}

/// Turn a raw mapping into a validated record of `kind`.
///
/// `stem` is the base name of the file the mapping came from; it supplies the
/// agent of tasks and reports that do not name one.
pub fn normalize(raw: &Mapping, kind: RecordKind, stem: &str) -> Result<Record, RejectReason> {
  let timestamp_text = derive_timestamp(raw)?;
  let details = derive_details(raw, kind, stem)?;

  let id = match raw.get(ID_KEY) {
    None | Some(Value::Null) => return Err(RejectReason::MissingId),
    Some(Value::String(s)) => s.clone(),
    Some(Value::Number(n)) => n.to_string(),
    Some(_) => return Err(RejectReason::WrongType { field: "id" }),
  };
  if id.trim().is_empty() {
    return Err(RejectReason::BlankId);
  }

  let status = optional_string(raw, "status")?
    .map(|s| s.parse::<Status>())
    .transpose()?;

  let timestamp = match timestamp_text {
    Some(text) => Some(Timestamp::parse(&text).ok_or(RejectReason::InvalidTimestamp(text))?),
    None => None,
  };

  let modelled = modelled_keys(kind);
  let extra = raw
    .iter()
    .filter(|(key, _)| !key.as_str().is_some_and(|k| modelled.contains(&k)))
    .map(|(key, value)| Ok((Value::String(key_text(key)?), string_keyed(value)?)))
    .collect::<Result<Mapping, RejectReason>>()?;

  Ok(Record {
    id,
    status,
    timestamp,
    details,
    extra,
  })
}

fn derive_timestamp(raw: &Mapping) -> Result<Option<String>, RejectReason> {
  for key in TIMESTAMP_KEYS {
    match raw.get(key) {
      None | Some(Value::Null) => continue,
      Some(Value::String(s)) if s.trim().is_empty() => continue,
      Some(Value::String(s)) => return Ok(Some(s.clone())),
      Some(_) => return Err(RejectReason::WrongType { field: "timestamp" }),
    }
  }
  Ok(None)
}

fn derive_details(raw: &Mapping, kind: RecordKind, stem: &str) -> Result<Details, RejectReason> {
  Ok(match kind {
    RecordKind::Command => Details::Command {
      project: optional_string(raw, "project")?,
      purpose: optional_string(raw, "purpose")?,
    },
    RecordKind::Task => Details::Task {
      agent: Some(derive_agent(raw, stem)?),
    },
    RecordKind::Report => Details::Report {
      agent: Some(derive_agent(raw, stem)?),
    },
  })
}

fn derive_agent(raw: &Mapping, stem: &str) -> Result<String, RejectReason> {
  Ok(
    optional_string(raw, "agent")?
      .filter(|agent| !agent.trim().is_empty())
      .unwrap_or_else(|| agent_from_stem(stem).to_string()),
  )
}

fn optional_string(raw: &Mapping, field: &'static str) -> Result<Option<String>, RejectReason> {
  match raw.get(field) {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) => Ok(Some(s.clone())),
    Some(_) => Err(RejectReason::WrongType { field }),
  }
}

/// Scalar keys as text; null, sequence and mapping keys have no JSON form.
fn key_text(key: &Value) -> Result<String, RejectReason> {
  match key {
    Value::String(s) => Ok(s.clone()),
    Value::Number(n) => Ok(n.to_string()),
    Value::Bool(b) => Ok(b.to_string()),
    _ => Err(RejectReason::NonScalarKey),
  }
}

/// Copy of `value` with every nested mapping keyed by strings.
fn string_keyed(value: &Value) -> Result<Value, RejectReason> {
  Ok(match value {
    Value::Mapping(map) => Value::Mapping(
      map
        .iter()
        .map(|(key, child)| Ok((Value::String(key_text(key)?), string_keyed(child)?)))
        .collect::<Result<Mapping, RejectReason>>()?,
    ),
    Value::Sequence(items) => Value::Sequence(
      items
        .iter()
        .map(string_keyed)
        .collect::<Result<Vec<_>, _>>()?,
    ),
    Value::Tagged(tagged) => Value::Tagged(Box::new(TaggedValue {
      tag: tagged.tag.clone(),
      value: string_keyed(&tagged.value)?,
    })),
    Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
  })
}

fn modelled_keys(kind: RecordKind) -> &'static [&'static str] {
  match kind {
    RecordKind::Command => &[ID_KEY, "status", "timestamp", "project", "purpose"],
    RecordKind::Task | RecordKind::Report => &[ID_KEY, "status", "timestamp", "agent"],
  }
}
