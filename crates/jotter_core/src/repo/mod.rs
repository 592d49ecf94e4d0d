//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for notes.
//! - Isolate file format details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `NewNote::validate()` before persistence.
//! - Every call is a full read-modify-write of the collection.

pub mod note_repo;
