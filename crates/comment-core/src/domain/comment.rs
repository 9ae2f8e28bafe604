//! Comment entities.
//!
//! [`NewComment`] is what arrives over the wire; [`Comment`] is what the
//! store keeps after the server has assigned an id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum length of a comment author's name, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Maximum length of a comment body, in characters.
pub const MAX_TEXT_CHARS: usize = 4000;

/// Reasons a [`NewComment`] is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommentError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("text must not be empty")]
    EmptyText,

    #[error("name exceeds {} characters", MAX_NAME_CHARS)]
    NameTooLong,

    #[error("text exceeds {} characters", MAX_TEXT_CHARS)]
    TextTooLong,
}

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub name: String,
    pub text: String,
    /// Submission time as stamped by the client, ISO-8601 on the wire.
    pub utc: DateTime<Utc>,
}

/// Body of a create request.
///
/// Fields the form may carry beyond these three are ignored on deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub name: String,
    pub text: String,
    pub utc: DateTime<Utc>,
}

impl NewComment {
    /// Trims `name` and `text` and checks them against the length limits.
    ///
    /// # Errors
    ///
    /// Returns the first [`CommentError`] that applies, checking `name`
    /// before `text`.
    pub fn validate(self) -> Result<Self, CommentError> {
        let name = self.name.trim().to_string();
        let text = self.text.trim().to_string();

        if name.is_empty() {
            return Err(CommentError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(CommentError::NameTooLong);
        }
        if text.is_empty() {
            return Err(CommentError::EmptyText);
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(CommentError::TextTooLong);
        }

        Ok(Self {
            name,
            text,
            utc: self.utc,
        })
    }

    /// Attaches the server-assigned id.
    pub fn into_comment(self, id: Uuid) -> Comment {
        Comment {
            id,
            name: self.name,
            text: self.text,
            utc: self.utc,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
