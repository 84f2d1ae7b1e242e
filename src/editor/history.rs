//! Undo/redo history for the rich-text engine.
//!
//! Entries hold reversible [`Edit`]s. Changes recorded within the configured
//! delay of an entry's first change are merged into that entry, the stack is
//! capped at `max_stack` entries, and with `user_only` set only changes made
//! by the user are recorded.

use std::time::{Duration, Instant};

use super::Source;
use super::runs::Run;

/// Construction-time history settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryOptions {
    /// Changes within this window of the entry's first change coalesce.
    pub delay: Duration,
    /// Maximum number of undo entries kept.
    pub max_stack: usize,
    /// Record only changes whose source is [`Source::User`].
    pub user_only: bool,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
            max_stack: 100,
            user_only: true,
        }
    }
}

/// A single reversible change to text or formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Insert {
        index: usize,
        text: String,
        runs: Vec<Run>,
    },
    Delete {
        index: usize,
        text: String,
        runs: Vec<Run>,
    },
    Restyle {
        index: usize,
        before: Vec<Run>,
        after: Vec<Run>,
    },
}

impl Edit {
    /// The edit that undoes this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        match self {
            Self::Insert { index, text, runs } => Self::Delete {
                index: *index,
                text: text.clone(),
                runs: runs.clone(),
            },
            Self::Delete { index, text, runs } => Self::Insert {
                index: *index,
                text: text.clone(),
                runs: runs.clone(),
            },
            Self::Restyle {
                index,
                before,
                after,
            } => Self::Restyle {
                index: *index,
                before: after.clone(),
                after: before.clone(),
            },
        }
    }

    /// Where the cursor lands after this edit is applied.
    pub fn landing(&self) -> usize {
        match self {
            Self::Insert { index, text, .. } => index + text.chars().count(),
            Self::Delete { index, .. } => *index,
            Self::Restyle { index, after, .. } => index + super::runs::total_len(after),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Entry {
    edits: Vec<Edit>,
}

#[derive(Debug, Clone)]
pub struct History {
    options: HistoryOptions,
    undo: Vec<Entry>,
    redo: Vec<Entry>,
    last_recorded: Option<Instant>,
}

impl History {
    pub const fn new(options: HistoryOptions) -> Self {
        Self {
            options,
            undo: Vec::new(),
            redo: Vec::new(),
            last_recorded: None,
        }
    }

    /// Record a change applied at `now`.
    pub fn record(&mut self, edits: Vec<Edit>, source: Source, now: Instant) {
        if edits.is_empty() {
            return;
        }
        if self.options.user_only && source != Source::User {
            return;
        }
        self.redo.clear();

        let within_delay = self
            .last_recorded
            .is_some_and(|at| now.saturating_duration_since(at) < self.options.delay);
        if within_delay && let Some(last) = self.undo.last_mut() {
            last.edits.extend(edits);
            return;
        }

        self.last_recorded = Some(now);
        self.undo.push(Entry { edits });
        if self.undo.len() > self.options.max_stack {
            self.undo.remove(0);
            tracing::trace!(max_stack = self.options.max_stack, "oldest undo entry dropped");
        }
    }

    /// Close the current entry so the next change starts a new one.
    pub const fn cutoff(&mut self) {
        self.last_recorded = None;
    }

    /// Pop the newest entry and return the edits that revert it, in order.
    pub fn take_undo(&mut self) -> Option<Vec<Edit>> {
        let entry = self.undo.pop()?;
        let reverted = entry.edits.iter().rev().map(Edit::inverse).collect();
        self.redo.push(entry);
        self.cutoff();
        Some(reverted)
    }

    /// Pop the newest undone entry and return the edits that reapply it.
    pub fn take_redo(&mut self) -> Option<Vec<Edit>> {
        let entry = self.redo.pop()?;
        let reapplied = entry.edits.clone();
        self.undo.push(entry);
        self.cutoff();
        Some(reapplied)
    }

    pub const fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub const fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HistoryOptions::default())
    }
}
