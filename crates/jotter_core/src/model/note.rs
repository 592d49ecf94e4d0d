//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted `Note` shape (`id`, `content`, `tags`).
//! - Provide `NewNote`, the validated input accepted by create paths.
//!
//! # Invariants
//! - `content` is never blank.
//! - `tags` keep caller order and duplicates; no tag is blank.
//! - `id` is assigned by the repository, never by callers.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Monotonically assigned note identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = u64;

/// Persisted user-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned id, unique for the lifetime of the store.
    pub id: NoteId,
    /// Text body exactly as supplied by the caller.
    pub content: String,
    /// Short labels in caller order.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Note {
    /// Returns whether `filter` occurs in the content (case-sensitive).
    ///
    /// An empty filter matches every note.
    pub fn matches(&self, filter: &str) -> bool {
        self.content.contains(filter)
    }
}

/// Validation failures for note input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Content is empty or whitespace only.
    EmptyContent,
    /// One of the tags is empty or whitespace only.
    BlankTag(String),
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content cannot be empty"),
            Self::BlankTag(value) => write!(f, "invalid tag: `{value}`"),
        }
    }
}

impl Error for NoteValidationError {}

/// Caller input for creating a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNote {
    pub content: String,
    pub tags: Vec<String>,
}

impl NewNote {
    /// Creates input with no tags.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tags: Vec::new(),
        }
    }

    /// Replaces the tag list, preserving order and duplicates.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Validates input invariants.
    ///
    /// Stricter than "non-empty": content made only of whitespace is rejected,
    /// and so is any tag that is empty or whitespace only. Callers splitting
    /// user input into tags should drop empty pieces first.
    ///
    /// # Errors
    /// - `EmptyContent` when content is blank.
    /// - `BlankTag` for the first blank tag.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.content.trim().is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        if let Some(tag) = self.tags.iter().find(|tag| tag.trim().is_empty()) {
            return Err(NoteValidationError::BlankTag(tag.clone()));
        }
        Ok(())
    }

    /// Materializes the note under a repository-assigned id.
    pub(crate) fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            content: self.content,
            tags: self.tags,
        }
    }
}
