use std::time::Instant;

use super::buffer::RichBuffer;
use super::format::Attribute;
use super::history::{Edit, History};
use super::{
    Bounds, EditInput, EditorCapability, EditorOptions, EditorView, Range, Segment,
    SelectionChange, Source,
};

/// The concrete rich-text engine behind [`EditorCapability`].
pub struct RichTextEditor {
    buffer: RichBuffer,
    history: History,
    /// Line index of the first visible line.
    scroll: usize,
    cols: u16,
    rows: u16,
}

impl RichTextEditor {
    pub fn new(options: EditorOptions) -> Self {
        Self::with_text(options, "")
    }

    pub fn with_text(options: EditorOptions, text: &str) -> Self {
        Self {
            buffer: RichBuffer::from_text(text),
            history: History::new(options.history),
            scroll: 0,
            cols: 80,
            rows: 24,
        }
    }

    pub const fn buffer(&self) -> &RichBuffer {
        &self.buffer
    }

    pub const fn history(&self) -> &History {
        &self.history
    }

    pub const fn scroll_offset(&self) -> usize {
        self.scroll
    }

    fn commit(&mut self, edits: Vec<Edit>, source: Source) {
        self.history.record(edits, source, Instant::now());
    }

    fn replay(&mut self, edits: Option<Vec<Edit>>) -> Option<SelectionChange> {
        let edits = edits?;
        let previous = self.selection();
        for edit in &edits {
            self.buffer.apply(edit);
        }
        if let Some(last) = edits.last() {
            self.buffer.place(last.landing());
        }
        self.scroll_to_cursor();
        self.change_since(previous, Source::User)
    }

    fn change_since(&self, previous: Option<Range>, source: Source) -> Option<SelectionChange> {
        let range = self.selection();
        (range != previous).then_some(SelectionChange {
            range,
            previous,
            source,
        })
    }

    fn max_scroll(&self) -> usize {
        self.buffer
            .line_count()
            .saturating_sub(usize::from(self.rows.max(1)))
    }

    fn scroll_to_cursor(&mut self) {
        let rows = usize::from(self.rows.max(1));
        let line = self.buffer.line_of(self.buffer.selection().head);
        if line < self.scroll {
            self.scroll = line;
        } else if line >= self.scroll + rows {
            self.scroll = line + 1 - rows;
        }
    }

    fn visible_segments(&self, line_idx: usize, selected: Range) -> Vec<Segment> {
        let range = self.buffer.line_range(line_idx);
        let mut chars = self.buffer.chars(range.clone());
        let mut segments: Vec<Segment> = Vec::new();
        let mut index = range.start;
        for run in self.buffer.runs().slice(range) {
            for _ in 0..run.len {
                let Some(ch) = chars.next() else {
                    break;
                };
                let in_selection = selected.contains(index);
                match segments.last_mut() {
                    Some(last) if last.attrs == run.attrs && last.selected == in_selection => {
                        last.text.push(ch);
                    }
                    _ => segments.push(Segment {
                        text: ch.to_string(),
                        attrs: run.attrs,
                        selected: in_selection,
                    }),
                }
                index += 1;
            }
        }
        segments
    }
}

impl EditorCapability for RichTextEditor {
    fn format(&mut self, attribute: Attribute, source: Source) {
        let range = self.buffer.selection().range();
        if let Some(edit) = self.buffer.restyle(range, attribute) {
            tracing::debug!(
                attribute = attribute.name(),
                index = range.index,
                length = range.length,
                "format applied"
            );
            self.commit(vec![edit], source);
        } else {
            tracing::debug!(attribute = attribute.name(), "format skipped: empty selection");
        }
    }

    fn bounds(&self, index: usize, length: usize) -> Bounds {
        let len = self.buffer.len_chars();
        let start = index.min(len);
        let end = index.saturating_add(length).min(len);
        let start_line = self.buffer.line_of(start);
        let end_line = self.buffer.line_of(end);
        let start_col = self.buffer.display_col(start);
        let end_col = self.buffer.display_col(end);
        let scroll = to_i32(self.scroll);
        let (left, right) = if start_line == end_line {
            (start_col, end_col)
        } else {
            (start_col.min(end_col), start_col.max(end_col))
        };
        Bounds {
            top: to_i32(start_line) - scroll,
            bottom: to_i32(end_line) - scroll + 1,
            left: to_i32(left),
            right: to_i32(right),
        }
    }

    fn undo(&mut self) -> Option<SelectionChange> {
        let edits = self.history.take_undo();
        self.replay(edits)
    }

    fn redo(&mut self) -> Option<SelectionChange> {
        let edits = self.history.take_redo();
        self.replay(edits)
    }

    fn handle_input(&mut self, input: EditInput) -> Option<SelectionChange> {
        let previous = self.selection();
        let edits = match input {
            EditInput::InsertChar(ch) => self.buffer.insert_text(&ch.to_string()),
            EditInput::InsertNewline => self.buffer.insert_text("\n"),
            EditInput::DeleteBack => self.buffer.delete_back(),
            EditInput::DeleteForward => self.buffer.delete_forward(),
            EditInput::Move { direction, extend } => {
                self.buffer.move_cursor(direction, extend);
                Vec::new()
            }
            EditInput::MoveWordLeft { extend } => {
                self.buffer.move_word_left(extend);
                Vec::new()
            }
            EditInput::MoveWordRight { extend } => {
                self.buffer.move_word_right(extend);
                Vec::new()
            }
            EditInput::MoveHome { extend } => {
                self.buffer.move_home(extend);
                Vec::new()
            }
            EditInput::MoveEnd { extend } => {
                self.buffer.move_end(extend);
                Vec::new()
            }
            EditInput::MoveToStart { extend } => {
                self.buffer.move_to_start(extend);
                Vec::new()
            }
            EditInput::MoveToEnd { extend } => {
                self.buffer.move_to_end(extend);
                Vec::new()
            }
            EditInput::MovePage { up, extend } => {
                let rows = isize::try_from(self.rows.max(1)).unwrap_or(1);
                self.buffer.move_lines(if up { -rows } else { rows }, extend);
                Vec::new()
            }
            EditInput::SelectAll => {
                self.buffer.select_all();
                Vec::new()
            }
            EditInput::PlaceCursor(index) => {
                self.buffer.place(index);
                Vec::new()
            }
            EditInput::ExtendTo(index) => {
                self.buffer.extend_to(index);
                Vec::new()
            }
            EditInput::Scroll(delta) => {
                let delta = isize::try_from(delta).unwrap_or(0);
                self.scroll = self
                    .scroll
                    .saturating_add_signed(delta)
                    .min(self.max_scroll());
                return self.change_since(previous, Source::User);
            }
        };
        self.commit(edits, Source::User);
        self.scroll_to_cursor();
        self.change_since(previous, Source::User)
    }

    fn selection(&self) -> Option<Range> {
        Some(self.buffer.selection().range())
    }

    fn index_at(&self, row: u16, col: u16) -> usize {
        self.buffer
            .index_at_display(self.scroll + usize::from(row), usize::from(col))
    }

    fn set_viewport(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.scroll = self.scroll.min(self.max_scroll());
        self.scroll_to_cursor();
    }

    fn view(&self) -> EditorView {
        let selection = self.buffer.selection();
        let selected = selection.range();
        let end = (self.scroll + usize::from(self.rows)).min(self.buffer.line_count());
        let lines = (self.scroll..end)
            .map(|line_idx| self.visible_segments(line_idx, selected))
            .collect();

        let head_line = self.buffer.line_of(selection.head);
        let cursor = (self.scroll..end).contains(&head_line).then(|| {
            let col = self.buffer.display_col(selection.head).min(usize::from(self.cols));
            (
                u16::try_from(col).unwrap_or(u16::MAX),
                u16::try_from(head_line - self.scroll).unwrap_or(u16::MAX),
            )
        });
        EditorView { lines, cursor }
    }

    fn text(&self) -> String {
        self.buffer.text()
    }
}

impl std::fmt::Debug for RichTextEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RichTextEditor")
            .field("buffer", &self.buffer)
            .field("undo_depth", &self.history.undo_depth())
            .field("scroll", &self.scroll)
            .finish_non_exhaustive()
    }
}

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
