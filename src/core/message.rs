//! Bounded-length team message: word counting, live validation and the
//! checks applied before a send.

use crate::core::team::{MemberId, OutgoingMessage};

/// Default upper bound on message length, in words.
pub const DEFAULT_MAX_WORDS: usize = 500;

/// Number of whitespace-delimited, non-empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Field values of one open message dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageDraft {
    pub sender_name: String,
    pub sender_email: String,
    pub body: String,
    /// Hidden recipient field.
    pub recipient: Option<MemberId>,
}

/// Result of live validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    pub word_count: usize,
    /// The word-limit warning is visible.
    pub over_limit: bool,
    /// The submit control is enabled.
    pub can_submit: bool,
}

/// Why a send was refused before any request was made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    #[error("Please write a message.")]
    Empty,
    #[error("Too long.")]
    TooLong { words: usize, max: usize },
    #[error("No recipient selected.")]
    NoRecipient,
}

impl MessageDraft {
    pub fn validate(&self, max_words: usize) -> Validation {
        let word_count = word_count(&self.body);
        let over_limit = word_count > max_words;
        let can_submit = !over_limit
            && !self.sender_name.trim().is_empty()
            && !self.sender_email.trim().is_empty()
            && !self.body.trim().is_empty();

        Validation {
            word_count,
            over_limit,
            can_submit,
        }
    }

    /// Checks applied on submit. Only the body is checked here; the server
    /// owns the remaining field rules.
    pub fn prepare_submit(&self, max_words: usize) -> Result<OutgoingMessage, SubmitBlocked> {
        let words = word_count(&self.body);
        if words == 0 {
            return Err(SubmitBlocked::Empty);
        }
        if words > max_words {
            return Err(SubmitBlocked::TooLong {
                words,
                max: max_words,
            });
        }
        let recipient = self.recipient.ok_or(SubmitBlocked::NoRecipient)?;

        Ok(OutgoingMessage {
            sender_name: self.sender_name.clone(),
            sender_email: self.sender_email.clone(),
            message: self.body.clone(),
            member_id: recipient.to_string(),
        })
    }
}
