//! Collection documents on disk.
//!
//! A collection is persisted as a JSON object with a single array field
//! named after the collection, pretty-printed with two-space indentation:
//!
//! ```json
//! {
//!   "animals": [
//!     { "id": "0", "name": "Novak", ... }
//!   ]
//! }
//! ```
//!
//! Writes replace the whole file. There is no partial-write handling.

use std::path::Path;

use serde_json::{Map, Value};
use zookeepr_types::Record;

use crate::error::StoreError;

/// Render `records` as the collection document for `R`.
pub fn encode_document<R: Record>(records: &[R]) -> Result<String, StoreError> {
    let mut document = Map::new();
    document.insert(R::COLLECTION.to_owned(), serde_json::to_value(records)?);
    Ok(serde_json::to_string_pretty(&Value::Object(document))?)
}

/// Parse a collection document for `R`.
///
/// `path` is only used to label errors.
pub fn decode_document<R: Record>(path: &Path, contents: &str) -> Result<Vec<R>, StoreError> {
    let mut document: Value = serde_json::from_str(contents)?;
    let records = document
        .get_mut(R::COLLECTION)
        .map(Value::take)
        .ok_or_else(|| StoreError::Malformed {
            path: path.to_path_buf(),
            message: format!("missing top-level `{}` field", R::COLLECTION),
        })?;

    if !records.is_array() {
        return Err(StoreError::Malformed {
            path: path.to_path_buf(),
            message: format!("`{}` is not an array", R::COLLECTION),
        });
    }

    Ok(serde_json::from_value(records)?)
}

/// Read the collection file at `path`.
///
/// Returns `Ok(None)` when the file does not exist.
pub async fn read_collection<R: Record>(path: &Path) -> Result<Option<Vec<R>>, StoreError> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => decode_document(path, &contents).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Overwrite the collection file at `path` with `records`.
///
/// Creates the parent directory if it is missing.
pub async fn write_collection<R: Record>(path: &Path, records: &[R]) -> Result<(), StoreError> {
    let contents = encode_document(records)?;
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    tokio::fs::write(path, contents).await.map_err(io_err)
}
