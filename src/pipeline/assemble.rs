// src/pipeline/assemble.rs

//! Dataset assembly pipeline.

use std::collections::HashMap;

use crate::codec;
use crate::error::Result;
use crate::storage::LocalStorage;

/// Decode every stored record into a field map carrying its section label.
///
/// The label of each row is the name of the directory the record sits in,
/// regardless of the SECTION_NAME inside the text. A file that cannot be
/// read is reported and skipped; it never fails the walk.
pub async fn run_assemble(storage: &LocalStorage) -> Result<Vec<HashMap<String, String>>> {
    let mut rows = Vec::new();

    for (label, path) in storage.walk().await? {
        match storage.read_record(&path).await {
            Ok(text) => rows.push(codec::decode_record(&text, &label)),
            Err(error) => {
                log::warn!("Skipping unreadable record {}: {}", path.display(), error);
            }
        }
    }

    log::info!("Assembled {} rows", rows.len());
    Ok(rows)
}
