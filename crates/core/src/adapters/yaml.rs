use std::fs;
use std::io;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::{ReadError, Result};

/// Read and parse a YAML document.
///
/// Returns `Ok(None)` when the file does not exist. A document that parses to
/// null (an empty file, a file holding only comments or `~`) is
/// `Some(Value::Null)`; callers that expect a mapping use
/// [`load_mapping_or_empty`].
pub fn load_document(path: &Path) -> Result<Option<Value>> {
  let content = match fs::read_to_string(path) {
    Ok(content) => content,
    Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
    Err(source) => {
      return Err(ReadError::FileRead {
        path: path.to_path_buf(),
        source,
      });
    }
  };
  parse_document(path, &content).map(Some)
}

/// Like [`load_document`], but a null document becomes an empty mapping.
pub fn load_mapping_or_empty(path: &Path) -> Result<Option<Value>> {
  Ok(load_document(path)?.map(|value| match value {
    Value::Null => Value::Mapping(Mapping::new()),
    other => other,
  }))
}

fn parse_document(path: &Path, content: &str) -> Result<Value> {
  serde_yaml::from_str(content).map_err(|err| ReadError::YamlParse {
    path: path.to_path_buf(),
    message: err.to_string(),
  })
}
