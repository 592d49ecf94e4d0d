//! Note repository contracts with file-backed and in-memory implementations.
//!
//! # Responsibility
//! - Provide create/list/find/remove/clear over the whole note collection.
//! - Serialize mutating calls so id assignment observes the latest state.
//!
//! # Invariants
//! - A mutation holds the repository lock from load until save completes.
//! - Callers only ever receive owned copies of notes.
//! - Missing ids are not errors: `remove_note` reports `false`.

use crate::model::note::{NewNote, Note, NoteId, NoteValidationError};
use crate::store::{load_document, save_document, NoteDocument, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(NoteValidationError),
    Storage(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

/// Repository interface for note operations.
pub trait NoteRepository {
    /// Validates input, assigns the next id and persists the new note.
    fn create_note(&self, input: NewNote) -> RepoResult<Note>;
    /// Returns all notes in insertion order.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    /// Returns notes whose content contains `filter` (case-sensitive).
    fn find_notes(&self, filter: &str) -> RepoResult<Vec<Note>>;
    /// Removes one note; returns whether it existed.
    fn remove_note(&self, id: NoteId) -> RepoResult<bool>;
    /// Removes all notes; returns how many were removed.
    fn clear_notes(&self) -> RepoResult<usize>;
}

/// JSON-file-backed note repository.
///
/// One instance per backing file is expected within a process; the internal
/// lock serializes read-modify-write cycles of that instance.
#[derive(Debug)]
pub struct FileNoteRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileNoteRepository {
    /// Creates a repository over `path`. The file is not touched until the
    /// first mutation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a poisoned lock carries no broken state.
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read<T>(&self, f: impl FnOnce(&NoteDocument) -> T) -> RepoResult<T> {
        let _guard = self.guard();
        let document = load_document(&self.path)?;
        Ok(f(&document))
    }

    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut NoteDocument) -> Option<T>,
        unchanged: T,
    ) -> RepoResult<T> {
        let _guard = self.guard();
        let mut document = load_document(&self.path)?;
        match f(&mut document) {
            Some(value) => {
                save_document(&self.path, &document)?;
                Ok(value)
            }
            None => Ok(unchanged),
        }
    }
}

impl NoteRepository for FileNoteRepository {
    fn create_note(&self, input: NewNote) -> RepoResult<Note> {
        input.validate()?;
        let _guard = self.guard();
        let mut document = load_document(&self.path)?;
        let note = document.insert(input)?;
        save_document(&self.path, &document)?;
        Ok(note)
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        self.read(|document| document.notes.clone())
    }

    fn find_notes(&self, filter: &str) -> RepoResult<Vec<Note>> {
        self.read(|document| document.find(filter))
    }

    fn remove_note(&self, id: NoteId) -> RepoResult<bool> {
        self.mutate(|document| document.remove(id).then_some(true), false)
    }

    fn clear_notes(&self) -> RepoResult<usize> {
        // Persist even when already empty so the file reflects the cleared state.
        self.mutate(|document| Some(document.clear()), 0)
    }
}

/// In-process note repository with the same id semantics as the file store.
#[derive(Debug, Default)]
pub struct MemoryNoteRepository {
    document: Mutex<NoteDocument>,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn document(&self) -> MutexGuard<'_, NoteDocument> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NoteRepository for MemoryNoteRepository {
    fn create_note(&self, input: NewNote) -> RepoResult<Note> {
        input.validate()?;
        Ok(self.document().insert(input)?)
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        Ok(self.document().notes.clone())
    }

    fn find_notes(&self, filter: &str) -> RepoResult<Vec<Note>> {
        Ok(self.document().find(filter))
    }

    fn remove_note(&self, id: NoteId) -> RepoResult<bool> {
        Ok(self.document().remove(id))
    }

    fn clear_notes(&self) -> RepoResult<usize> {
        Ok(self.document().clear())
    }
}
