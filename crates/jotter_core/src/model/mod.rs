//! Domain model for user-authored notes.
//!
//! # Responsibility
//! - Define the canonical note record persisted by the store.
//! - Validate caller input before it reaches persistence.
//!
//! # Invariants
//! - Every note is identified by a `NoteId` that is never reused.
//! - Notes are immutable after creation; there is no update path.

pub mod note;
