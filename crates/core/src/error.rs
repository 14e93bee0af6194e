use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable machine-readable code attached to every read failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
  PathNotAllowed,
  FileNotFound,
  YamlParseError,
  FileReadError,
}

impl ErrorCode {
  pub fn as_str(self) -> &'static str {
    match self {
      ErrorCode::PathNotAllowed => "PATH_NOT_ALLOWED",
      ErrorCode::FileNotFound => "FILE_NOT_FOUND",
      ErrorCode::YamlParseError => "YAML_PARSE_ERROR",
      ErrorCode::FileReadError => "FILE_READ_ERROR",
    }
  }
}

impl fmt::Display for ErrorCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Failures surfaced by the path guard and the document loader.
#[derive(Debug, Error)]
pub enum ReadError {
  #[error("path is outside allowed roots: {path}")]
  PathNotAllowed { path: String },
  #[error("file not found: {path}")]
  FileNotFound { path: String },
  #[error("yaml parse error in {}: {message}", path.display())]
  YamlParse { path: PathBuf, message: String },
  #[error("failed to read {}: {source}", path.display())]
  FileRead {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl ReadError {
  pub fn code(&self) -> ErrorCode {
    match self {
      ReadError::PathNotAllowed { .. } => ErrorCode::PathNotAllowed,
      ReadError::FileNotFound { .. } => ErrorCode::FileNotFound,
      ReadError::YamlParse { .. } => ErrorCode::YamlParseError,
      ReadError::FileRead { .. } => ErrorCode::FileReadError,
    }
  }

  /// Structured details for transport envelopes.
  pub fn details(&self) -> serde_json::Value {
    match self {
      ReadError::PathNotAllowed { path } | ReadError::FileNotFound { path } => {
        serde_json::json!({ "path": path })
      }
      ReadError::YamlParse { path, message } => {
        serde_json::json!({ "path": path.display().to_string(), "parser": message })
      }
      ReadError::FileRead { path, source } => {
        serde_json::json!({ "path": path.display().to_string(), "io": source.to_string() })
      }
    }
  }
}

pub type Result<T> = std::result::Result<T, ReadError>;
