//! Note use-case service.
//!
//! # Responsibility
//! - Provide create/list/find/remove/clear APIs to the CLI and web layers.
//! - Map repository failures onto the validation/storage error taxonomy.
//! - Emit metadata-only diagnostic events (never note content).
//!
//! # Invariants
//! - Notes are never edited after creation.
//! - Unknown ids and unmatched filters are soft results, not errors.

use crate::model::note::{NewNote, Note, NoteId, NoteValidationError};
use crate::repo::note_repo::{NoteRepository, RepoError};
use crate::store::StoreError;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Caller input was rejected; nothing was persisted.
    Validation(NoteValidationError),
    /// Backing store could not be read, decoded or written.
    Storage(StoreError),
}

impl NoteServiceError {
    /// Returns whether the failure was caused by caller input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::Storage(err) => Self::Storage(err),
        }
    }
}

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Creates one note with the given tags (order and duplicates kept).
    pub fn create_note(
        &self,
        content: impl Into<String>,
        tags: Vec<String>,
    ) -> NoteServiceResult<Note> {
        let input = NewNote {
            content: content.into(),
            tags,
        };
        let tag_count = input.tags.len();
        match self.repo.create_note(input) {
            Ok(note) => {
                info!(
                    "event=note_create module=service status=ok note_id={} tag_count={}",
                    note.id, tag_count
                );
                Ok(note)
            }
            Err(err) => Err(log_failure("note_create", err)),
        }
    }

    /// Lists every note in insertion order.
    pub fn list_notes(&self) -> NoteServiceResult<Vec<Note>> {
        self.repo
            .list_notes()
            .map_err(|err| log_failure("note_list", err))
    }

    /// Lists notes whose content contains `filter`; `""` matches all.
    pub fn find_notes(&self, filter: &str) -> NoteServiceResult<Vec<Note>> {
        let notes = self
            .repo
            .find_notes(filter)
            .map_err(|err| log_failure("note_find", err))?;
        info!(
            "event=note_find module=service status=ok filter_len={} hits={}",
            filter.chars().count(),
            notes.len()
        );
        Ok(notes)
    }

    /// Removes one note by id; returns `false` when no such note exists.
    pub fn remove_note(&self, id: NoteId) -> NoteServiceResult<bool> {
        let removed = self
            .repo
            .remove_note(id)
            .map_err(|err| log_failure("note_remove", err))?;
        if removed {
            info!("event=note_remove module=service status=ok note_id={id}");
        } else {
            warn!("event=note_remove module=service status=miss note_id={id}");
        }
        Ok(removed)
    }

    /// Removes all notes; returns how many were removed.
    pub fn clear_notes(&self) -> NoteServiceResult<usize> {
        let removed = self
            .repo
            .clear_notes()
            .map_err(|err| log_failure("note_clear", err))?;
        info!("event=note_clear module=service status=ok removed={removed}");
        Ok(removed)
    }
}

fn log_failure(event: &str, err: RepoError) -> NoteServiceError {
    let err = NoteServiceError::from(err);
    if err.is_validation() {
        warn!("event={event} module=service status=rejected error={err}");
    } else {
        error!("event={event} module=service status=error error={err}");
    }
    err
}

#[cfg(test)]
mod tests {
    use super::{NoteService, NoteServiceError};
    use crate::model::note::NoteValidationError;
    use crate::repo::note_repo::MemoryNoteRepository;

    #[test]
    fn create_maps_validation_error() {
        let service = NoteService::new(MemoryNoteRepository::new());
        let err = service.create_note(" ", Vec::new()).unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(
            err,
            NoteServiceError::Validation(NoteValidationError::EmptyContent)
        ));
        assert!(service.list_notes().unwrap().is_empty());
    }

    #[test]
    fn find_empty_filter_returns_everything() {
        let service = NoteService::new(MemoryNoteRepository::new());
        service.create_note("one", Vec::new()).unwrap();
        service.create_note("two", vec!["x".to_string()]).unwrap();
        assert_eq!(service.find_notes("").unwrap(), service.list_notes().unwrap());
    }
}
