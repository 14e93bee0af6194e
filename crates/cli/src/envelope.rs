use serde::Serialize;
use serde_json::Value;
use shogun_core::ReadError;
use shogun_core::domain::timestamp::now_iso8601;

/// Code for lookups that found nothing; not a read failure.
pub const NOT_FOUND: &str = "NOT_FOUND";

/// JSON shape printed for every subcommand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
  pub data: Value,
  pub meta: Meta,
  pub error: Option<EnvelopeError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meta {
  pub total: Option<usize>,
  pub limit: Option<usize>,
  pub offset: Option<usize>,
  pub source_root: String,
  pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvelopeError {
  pub code: String,
  pub message: String,
  pub details: Value,
}

impl Envelope {
  pub fn ok(data: Value, source_root: impl Into<String>) -> Self {
    Self {
      data,
      meta: Meta::new(source_root.into()),
      error: None,
    }
  }

  pub fn failure(
    code: impl Into<String>,
    message: impl Into<String>,
    details: Value,
    source_root: impl Into<String>,
  ) -> Self {
    Self {
      data: Value::Null,
      meta: Meta::new(source_root.into()),
      error: Some(EnvelopeError {
        code: code.into(),
        message: message.into(),
        details,
      }),
    }
  }

  pub fn from_read_error(err: &ReadError, source_root: impl Into<String>) -> Self {
    Self::failure(err.code().as_str(), err.to_string(), err.details(), source_root)
  }

  pub fn with_total(mut self, total: usize) -> Self {
    self.meta.total = Some(total);
    self
  }

  pub fn with_page(mut self, total: usize, limit: usize, offset: usize) -> Self {
    self.meta.total = Some(total);
    self.meta.limit = Some(limit);
    self.meta.offset = Some(offset);
    self
  }

  pub fn is_error(&self) -> bool {
    self.error.is_some()
  }
}

impl Meta {
  fn new(source_root: String) -> Self {
    Self {
      total: None,
      limit: None,
      offset: None,
      source_root,
      generated_at: now_iso8601(),
    }
  }
}
