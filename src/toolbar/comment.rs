//! Non-blocking comment entry.
//!
//! Starting a comment opens a [`CommentPrompt`] that collects text while the
//! event loop keeps running. Resolving it yields an explicit
//! [`CommentOutcome`] so cancelled and empty input are ordinary results.

/// Pending single-line text input for a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentPrompt {
    input: String,
}

/// How a comment prompt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentOutcome {
    /// Non-empty text was submitted.
    Added(String),
    /// The prompt was dismissed.
    Cancelled,
    /// Submitted with no text.
    Empty,
}

impl CommentPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// A prompt holding `text`, minus control characters.
    pub fn with_input(text: &str) -> Self {
        Self {
            input: text.chars().filter(|ch| !ch.is_control()).collect(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Resolve the prompt as submitted.
    pub fn submit(self) -> CommentOutcome {
        if self.input.is_empty() {
            CommentOutcome::Empty
        } else {
            CommentOutcome::Added(self.input)
        }
    }

    /// Resolve the prompt as dismissed.
    pub fn cancel(self) -> CommentOutcome {
        CommentOutcome::Cancelled
    }
}

/// Confirmation shown after a comment is added.
pub fn confirmation(text: &str) -> String {
    format!("Comment added: \"{text}\"")
}
