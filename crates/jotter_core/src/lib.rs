//! Core domain logic for jotter.
//!
//! Owns the note store, the query layer and HTML rendering; the CLI and web
//! server are thin callers of the APIs re-exported here.

pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging};
pub use model::note::{NewNote, Note, NoteId, NoteValidationError};
pub use render::html::{
    escape_html, format_notes, interpolate, render_page, DEFAULT_TEMPLATE,
};
pub use repo::note_repo::{
    FileNoteRepository, MemoryNoteRepository, NoteRepository, RepoError, RepoResult,
};
pub use service::note_service::{NoteService, NoteServiceError, NoteServiceResult};
pub use store::{NoteDocument, StoreError, StoreResult, STORE_FORMAT_VERSION};
