//! File load/save utilities for the note document.
//!
//! # Responsibility
//! - Read the JSON document, treating a missing or blank file as empty.
//! - Replace the file atomically via a sibling temp file and rename.
//!
//! # Invariants
//! - Reads never create the file or its parent directory.
//! - Writes are flushed and synced before the rename.

use super::{NoteDocument, StoreError, StoreResult, STORE_FORMAT_VERSION};
use log::{debug, error, info};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;

/// Loads the note document stored at `path`.
///
/// # Errors
/// - `Io` when the file exists but cannot be read.
/// - `Corrupt` when the content is not a valid note document.
/// - `UnsupportedVersion` when written by a newer format.
pub fn load_document(path: &Path) -> StoreResult<NoteDocument> {
    let started_at = Instant::now();
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("event=store_load module=store status=ok mode=missing");
            return Ok(NoteDocument::default());
        }
        Err(source) => {
            error!(
                "event=store_load module=store status=error error_code=store_read_failed error={}",
                source
            );
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if raw.trim().is_empty() {
        debug!("event=store_load module=store status=ok mode=blank");
        return Ok(NoteDocument::default());
    }

    let document = decode_document(path, &raw).inspect_err(|err| {
        error!(
            "event=store_load module=store status=error error_code=store_decode_failed error={}",
            err
        );
    })?;

    debug!(
        "event=store_load module=store status=ok mode=file notes={} duration_ms={}",
        document.notes.len(),
        started_at.elapsed().as_millis()
    );
    Ok(document)
}

/// Atomically replaces the file at `path` with `document`.
///
/// Parent directories are created on demand.
///
/// # Errors
/// - `Io` when the directory, temp file or rename fails.
/// - `Serialize` when encoding fails.
pub fn save_document(path: &Path, document: &NoteDocument) -> StoreResult<()> {
    let started_at = Instant::now();
    match write_atomically(path, document) {
        Ok(()) => {
            info!(
                "event=store_save module=store status=ok notes={} last_id={} duration_ms={}",
                document.notes.len(),
                document.last_id,
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=store_save module=store status=error duration_ms={} error_code=store_write_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn decode_document(path: &Path, raw: &str) -> StoreResult<NoteDocument> {
    let document: NoteDocument =
        serde_json::from_str(raw).map_err(|err| StoreError::Corrupt {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    if document.version > STORE_FORMAT_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: document.version,
            supported: STORE_FORMAT_VERSION,
        });
    }

    document
        .check_integrity()
        .map_err(|message| StoreError::Corrupt {
            path: path.to_path_buf(),
            message,
        })?;

    Ok(document)
}

fn write_atomically(path: &Path, document: &NoteDocument) -> StoreResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(parent).map_err(io_err)?;

    let mut temp = NamedTempFile::new_in(parent).map_err(io_err)?;
    serde_json::to_writer_pretty(temp.as_file_mut(), document).map_err(StoreError::Serialize)?;
    temp.write_all(b"\n").map_err(io_err)?;
    temp.as_file().sync_all().map_err(io_err)?;
    temp.persist(path).map_err(|err| io_err(err.error))?;
    Ok(())
}
