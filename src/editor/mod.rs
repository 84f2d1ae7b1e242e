//! The embedded rich-text editor.
//!
//! The rest of the application talks to the editor only through the
//! [`EditorCapability`] trait, reached via an [`EditorHandle`] that reports
//! [`EditorError::NotReady`] until an editor has been mounted.
//! [`RichTextEditor`] is the concrete engine: a rope-backed text buffer with
//! run-length formatting and an undo/redo history.

mod buffer;
mod engine;
mod format;
mod history;
mod runs;

pub use buffer::{Direction, RichBuffer, Selection};
pub use engine::RichTextEditor;
pub use format::{Attribute, Attributes, Background};
pub use history::{Edit, History, HistoryOptions};
pub use runs::{Run, Runs};

/// A span of the document in char indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Range {
    pub index: usize,
    pub length: usize,
}

impl Range {
    pub const fn new(index: usize, length: usize) -> Self {
        Self { index, length }
    }

    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub const fn contains(&self, index: usize) -> bool {
        index >= self.index && index < self.index + self.length
    }
}

/// Who caused a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    User,
    Api,
    Silent,
}

/// Selection-change notification emitted by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub range: Option<Range>,
    pub previous: Option<Range>,
    pub source: Source,
}

/// Editor-local cell bounds of a range, relative to the visible content area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

/// Construction-time editor settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorOptions {
    pub history: HistoryOptions,
}

/// User input forwarded to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditInput {
    InsertChar(char),
    InsertNewline,
    DeleteBack,
    DeleteForward,
    Move { direction: Direction, extend: bool },
    MoveWordLeft { extend: bool },
    MoveWordRight { extend: bool },
    MoveHome { extend: bool },
    MoveEnd { extend: bool },
    MoveToStart { extend: bool },
    MoveToEnd { extend: bool },
    /// Move by one viewport height.
    MovePage { up: bool, extend: bool },
    SelectAll,
    /// Collapse the selection at a char index (mouse down).
    PlaceCursor(usize),
    /// Extend the selection to a char index (mouse drag).
    ExtendTo(usize),
    /// Scroll the view without moving the cursor.
    Scroll(i32),
}

/// A run of visible text with uniform formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub attrs: Attributes,
    pub selected: bool,
}

/// Snapshot of the visible part of the editor for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorView {
    pub lines: Vec<Vec<Segment>>,
    /// Cursor cell `(col, row)` relative to the content area, when visible.
    pub cursor: Option<(u16, u16)>,
}

/// The capability surface the application consumes.
pub trait EditorCapability {
    /// Apply a format to the current selection.
    fn format(&mut self, attribute: Attribute, source: Source);

    /// Cell bounds of `length` chars starting at `index`.
    fn bounds(&self, index: usize, length: usize) -> Bounds;

    // History
    fn undo(&mut self) -> Option<SelectionChange>;
    fn redo(&mut self) -> Option<SelectionChange>;

    /// Apply user input, reporting a selection change if the range moved.
    fn handle_input(&mut self, input: EditInput) -> Option<SelectionChange>;

    fn selection(&self) -> Option<Range>;

    /// Char index under a content-relative cell.
    fn index_at(&self, row: u16, col: u16) -> usize;

    fn set_viewport(&mut self, cols: u16, rows: u16);

    fn view(&self) -> EditorView;

    fn text(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("editor is not mounted yet")]
    NotReady,
}

/// Accessor for the embedded editor, empty until [`EditorHandle::mount`].
#[derive(Default)]
pub struct EditorHandle {
    inner: Option<Box<dyn EditorCapability>>,
}

impl EditorHandle {
    pub fn mount(&mut self, editor: Box<dyn EditorCapability>) {
        self.inner = Some(editor);
    }

    pub const fn is_ready(&self) -> bool {
        self.inner.is_some()
    }

    /// Borrow the editor.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotReady`] before an editor is mounted.
    pub fn ready(&self) -> Result<&dyn EditorCapability, EditorError> {
        self.inner.as_deref().ok_or(EditorError::NotReady)
    }

    /// Mutably borrow the editor.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotReady`] before an editor is mounted.
    pub fn ready_mut(&mut self) -> Result<&mut dyn EditorCapability, EditorError> {
        match self.inner.as_mut() {
            Some(editor) => Ok(editor.as_mut()),
            None => Err(EditorError::NotReady),
        }
    }
}

impl std::fmt::Debug for EditorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorHandle")
            .field("ready", &self.is_ready())
            .finish()
    }
}
