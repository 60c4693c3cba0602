//! Body part document loading.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;

use crate::types::{IndexError, IndexResult};

/// Reads a body part JSON document from a local file.
///
/// # Errors
/// Returns [`IndexError::FileNotFound`] if the path does not exist, or an
/// I/O or JSON error if the file cannot be read or parsed.
pub fn read_document<P: AsRef<Path>>(path: P) -> IndexResult<Value> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(IndexError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    tracing::debug!("Reading body part document from {}", path.display());
    let file = File::open(path)?;
    read_document_from(BufReader::new(file))
}

/// Reads a body part JSON document from any reader.
pub fn read_document_from<R: Read>(reader: R) -> IndexResult<Value> {
    Ok(serde_json::from_reader(reader)?)
}
