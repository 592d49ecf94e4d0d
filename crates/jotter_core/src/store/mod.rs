//! On-disk note document and its persistence entry points.
//!
//! # Responsibility
//! - Define the serialized document shape (`version`, `last_id`, `notes`).
//! - Own id assignment and collection edits on an owned in-memory copy.
//! - Load and atomically replace the backing file.
//!
//! # Invariants
//! - `last_id` is a high-water mark and never decreases.
//! - A failed write leaves the previously persisted file intact.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::note::{NewNote, Note, NoteId};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod file;

pub use file::{load_document, save_document};

/// Latest document format version this build can read and write.
pub const STORE_FORMAT_VERSION: u32 = 1;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error for reading, decoding and writing the note file.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// File exists but its content is not a valid note document.
    Corrupt { path: PathBuf, message: String },
    Serialize(serde_json::Error),
    UnsupportedVersion { found: u32, supported: u32 },
    /// Every id up to `NoteId::MAX` has been handed out.
    IdSpaceExhausted,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot access note store `{}`: {source}", path.display())
            }
            Self::Corrupt { path, message } => {
                write!(f, "note store `{}` is corrupt: {message}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to encode note store: {err}"),
            Self::UnsupportedVersion { found, supported } => write!(
                f,
                "note store version {found} is newer than supported {supported}"
            ),
            Self::IdSpaceExhausted => write!(f, "note id space exhausted"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::Corrupt { .. } | Self::UnsupportedVersion { .. } | Self::IdSpaceExhausted => {
                None
            }
        }
    }
}

fn default_version() -> u32 {
    STORE_FORMAT_VERSION
}

/// Full persisted collection.
///
/// Repositories load one of these per call, edit it and write it back whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Largest id ever assigned by this store.
    #[serde(default)]
    pub last_id: NoteId,
    /// Notes in insertion order.
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Default for NoteDocument {
    fn default() -> Self {
        Self {
            version: STORE_FORMAT_VERSION,
            last_id: 0,
            notes: Vec::new(),
        }
    }
}

impl NoteDocument {
    /// Returns the id the next created note will receive.
    ///
    /// # Errors
    /// - `IdSpaceExhausted` once `NoteId::MAX` has been assigned.
    pub fn next_id(&self) -> StoreResult<NoteId> {
        self.high_water_mark()
            .checked_add(1)
            .ok_or(StoreError::IdSpaceExhausted)
    }

    /// Appends a note under the next id and returns a copy of it.
    ///
    /// Input must already be validated by the caller. The document is left
    /// unchanged on error.
    pub fn insert(&mut self, input: NewNote) -> StoreResult<Note> {
        let id = self.next_id()?;
        let note = input.into_note(id);
        self.last_id = id;
        self.notes.push(note.clone());
        Ok(note)
    }

    /// Removes the note with `id`; returns whether one was removed.
    pub fn remove(&mut self, id: NoteId) -> bool {
        let Some(index) = self.notes.iter().position(|note| note.id == id) else {
            return false;
        };
        self.last_id = self.high_water_mark();
        self.notes.remove(index);
        true
    }

    /// Drops every note and returns how many were dropped.
    ///
    /// The high-water mark is kept so ids are not reused afterwards.
    pub fn clear(&mut self) -> usize {
        self.last_id = self.high_water_mark();
        let removed = self.notes.len();
        self.notes.clear();
        removed
    }

    /// Copies notes whose content contains `filter`, in stored order.
    pub fn find(&self, filter: &str) -> Vec<Note> {
        self.notes
            .iter()
            .filter(|note| note.matches(filter))
            .cloned()
            .collect()
    }

    fn high_water_mark(&self) -> NoteId {
        self.notes
            .iter()
            .map(|note| note.id)
            .max()
            .map_or(self.last_id, |max_id| max_id.max(self.last_id))
    }

    /// Checks invariants that serde cannot express.
    pub(crate) fn check_integrity(&self) -> Result<(), String> {
        let mut seen = std::collections::BTreeSet::new();
        for note in &self.notes {
            if note.id == 0 {
                return Err("note id 0 is reserved".to_string());
            }
            if !seen.insert(note.id) {
                return Err(format!("duplicate note id {}", note.id));
            }
        }
        Ok(())
    }
}
