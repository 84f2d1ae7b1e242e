use std::ops::Range as CharRange;

use ropey::Rope;
use unicode_width::UnicodeWidthChar;

use super::Range;
use super::format::{Attribute, Attributes};
use super::history::Edit;
use super::runs::{Run, Runs};

/// Anchor/head pair of char indices; the head is where the cursor sits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    /// A collapsed selection at `index`.
    pub const fn caret(index: usize) -> Self {
        Self {
            anchor: index,
            head: index,
        }
    }

    pub const fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    pub const fn start(&self) -> usize {
        if self.anchor < self.head {
            self.anchor
        } else {
            self.head
        }
    }

    pub const fn end(&self) -> usize {
        if self.anchor > self.head {
            self.anchor
        } else {
            self.head
        }
    }

    /// The selection as an `(index, length)` range.
    pub const fn range(&self) -> Range {
        Range {
            index: self.start(),
            length: self.end() - self.start(),
        }
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Rich text backed by a rope, with run-length formatting and a selection.
///
/// Editing methods return the [`Edit`]s they applied so the caller can
/// record them in history. The run lengths always add up to the rope's
/// char count.
pub struct RichBuffer {
    rope: Rope,
    runs: Runs,
    selection: Selection,
    /// Remembered display column for vertical movement (sticky column).
    col_memory: usize,
}

impl RichBuffer {
    /// Create a new unformatted buffer from a string.
    pub fn from_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let runs = Runs::plain(rope.len_chars());
        Self {
            rope,
            runs,
            selection: Selection::default(),
            col_memory: 0,
        }
    }

    pub const fn selection(&self) -> Selection {
        self.selection
    }

    pub const fn runs(&self) -> &Runs {
        &self.runs
    }

    /// Number of chars in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Chars within `range`.
    pub fn chars(&self, range: CharRange<usize>) -> impl Iterator<Item = char> + '_ {
        self.rope.slice(range).chars()
    }

    /// Char range of a line, excluding its line break.
    pub fn line_range(&self, line_idx: usize) -> CharRange<usize> {
        if line_idx >= self.rope.len_lines() {
            let end = self.rope.len_chars();
            return end..end;
        }
        let start = self.rope.line_to_char(line_idx);
        let line = self.rope.line(line_idx);
        let mut len = line.len_chars();
        while len > 0 && matches!(line.char(len - 1), '\n' | '\r') {
            len -= 1;
        }
        start..start + len
    }

    /// Line index containing the char at `index`.
    pub fn line_of(&self, index: usize) -> usize {
        self.rope.char_to_line(index.min(self.rope.len_chars()))
    }

    /// Display column (terminal cells) of `index` within its line.
    pub fn display_col(&self, index: usize) -> usize {
        let index = index.min(self.rope.len_chars());
        let start = self.rope.line_to_char(self.line_of(index));
        self.chars(start..index).map(char_width).sum()
    }

    /// Char index at display column `col` of `line_idx`, clamped to the line.
    pub fn index_at_display(&self, line_idx: usize, col: usize) -> usize {
        let line_idx = line_idx.min(self.line_count().saturating_sub(1));
        let range = self.line_range(line_idx);
        let mut width = 0;
        let mut index = range.start;
        for ch in self.chars(range.clone()) {
            let w = char_width(ch);
            if width + w > col {
                break;
            }
            width += w;
            index += 1;
        }
        index.min(range.end)
    }

    /// Replace the selection with `text`, inheriting the formatting of the
    /// preceding char.
    pub fn insert_text(&mut self, text: &str) -> Vec<Edit> {
        let mut edits = self.delete_selection();
        if text.is_empty() {
            return edits;
        }
        let index = self.selection.head;
        let attrs = if index > 0 {
            self.runs.attrs_at(index - 1)
        } else {
            Attributes::default()
        };
        let edit = Edit::Insert {
            index,
            text: text.to_string(),
            runs: vec![Run::new(text.chars().count(), attrs)],
        };
        self.apply(&edit);
        self.set_head(edit.landing(), false);
        edits.push(edit);
        edits
    }

    /// Delete the selection, or the char before the cursor (Backspace).
    pub fn delete_back(&mut self) -> Vec<Edit> {
        if !self.selection.is_collapsed() {
            return self.delete_selection();
        }
        let head = self.selection.head;
        if head == 0 {
            return Vec::new();
        }
        let edit = self.delete_range(head - 1..head);
        self.set_head(head - 1, false);
        vec![edit]
    }

    /// Delete the selection, or the char at the cursor (Delete).
    pub fn delete_forward(&mut self) -> Vec<Edit> {
        if !self.selection.is_collapsed() {
            return self.delete_selection();
        }
        let head = self.selection.head;
        if head >= self.rope.len_chars() {
            return Vec::new();
        }
        vec![self.delete_range(head..head + 1)]
    }

    /// Apply `attribute` to `range`. Empty ranges change nothing.
    pub fn restyle(&mut self, range: Range, attribute: Attribute) -> Option<Edit> {
        let end = (range.index + range.length).min(self.rope.len_chars());
        let start = range.index.min(end);
        if start == end {
            return None;
        }
        let (before, after) = self.runs.restyle(start..end, attribute);
        Some(Edit::Restyle {
            index: start,
            before,
            after,
        })
    }

    /// Apply an edit without recording it (history replay).
    pub fn apply(&mut self, edit: &Edit) {
        match edit {
            Edit::Insert { index, text, runs } => {
                let index = (*index).min(self.rope.len_chars());
                self.rope.insert(index, text);
                self.runs.insert(index, runs);
            }
            Edit::Delete { index, text, .. } => {
                let start = (*index).min(self.rope.len_chars());
                let end = (start + text.chars().count()).min(self.rope.len_chars());
                self.rope.remove(start..end);
                self.runs.remove(start..end);
            }
            Edit::Restyle { index, after, .. } => {
                self.runs.replace(*index, after);
            }
        }
        debug_assert_eq!(self.runs.len(), self.rope.len_chars());
    }

    /// Collapse the selection at `index`.
    pub fn place(&mut self, index: usize) {
        self.set_head(index, false);
    }

    /// Move the head to `index`, keeping the anchor (mouse drag).
    pub fn extend_to(&mut self, index: usize) {
        self.set_head(index, true);
    }

    /// Select the whole buffer.
    pub fn select_all(&mut self) {
        self.selection = Selection {
            anchor: 0,
            head: self.rope.len_chars(),
        };
        self.col_memory = self.display_col(self.selection.head);
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction, extend: bool) {
        match direction {
            Direction::Left => self.move_left(extend),
            Direction::Right => self.move_right(extend),
            Direction::Up => self.move_lines(-1, extend),
            Direction::Down => self.move_lines(1, extend),
        }
    }

    /// Move the cursor `delta` lines, keeping the sticky column.
    pub fn move_lines(&mut self, delta: isize, extend: bool) {
        let line = self.line_of(self.selection.head);
        let last = self.line_count().saturating_sub(1);
        let target = line.saturating_add_signed(delta).min(last);
        let index = self.index_at_display(target, self.col_memory);
        let col_memory = self.col_memory;
        self.set_head(index, extend);
        self.col_memory = col_memory;
    }

    /// Move cursor to the beginning of the line (Home).
    pub fn move_home(&mut self, extend: bool) {
        let start = self.line_range(self.line_of(self.selection.head)).start;
        self.set_head(start, extend);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self, extend: bool) {
        let end = self.line_range(self.line_of(self.selection.head)).end;
        self.set_head(end, extend);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self, extend: bool) {
        let head = self.selection.head;
        let line_start = self.line_range(self.line_of(head)).start;
        if head == line_start {
            self.set_head(head.saturating_sub(1), extend);
            return;
        }
        let before: Vec<char> = self.chars(line_start..head).collect();
        let mut pos = before.len();
        while pos > 0 && !is_word_char(before[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && is_word_char(before[pos - 1]) {
            pos -= 1;
        }
        self.set_head(line_start + pos, extend);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self, extend: bool) {
        let head = self.selection.head;
        let line_end = self.line_range(self.line_of(head)).end;
        if head >= line_end {
            let next = (head + 1).min(self.rope.len_chars());
            let next = if self.line_of(next) == self.line_of(head) {
                head
            } else {
                next
            };
            self.set_head(next, extend);
            return;
        }
        let after: Vec<char> = self.chars(head..line_end).collect();
        // Skip current word characters, then the gap after it
        let word_end = after
            .iter()
            .position(|c| !is_word_char(*c))
            .unwrap_or(after.len());
        let space_end = after[word_end..]
            .iter()
            .position(|c| is_word_char(*c))
            .unwrap_or(after.len() - word_end);
        self.set_head(head + word_end + space_end, extend);
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub fn move_to_start(&mut self, extend: bool) {
        self.set_head(0, extend);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self, extend: bool) {
        self.set_head(self.rope.len_chars(), extend);
    }

    // --- Private helpers ---

    fn delete_selection(&mut self) -> Vec<Edit> {
        if self.selection.is_collapsed() {
            return Vec::new();
        }
        let start = self.selection.start();
        let edit = self.delete_range(start..self.selection.end());
        self.set_head(start, false);
        vec![edit]
    }

    fn delete_range(&mut self, range: CharRange<usize>) -> Edit {
        let edit = Edit::Delete {
            index: range.start,
            text: self.rope.slice(range.clone()).to_string(),
            runs: self.runs.slice(range),
        };
        self.apply(&edit);
        edit
    }

    fn set_head(&mut self, index: usize, extend: bool) {
        let index = index.min(self.rope.len_chars());
        self.selection.head = index;
        if !extend {
            self.selection.anchor = index;
        }
        self.col_memory = self.display_col(index);
    }

    fn move_left(&mut self, extend: bool) {
        if !extend && !self.selection.is_collapsed() {
            self.set_head(self.selection.start(), false);
            return;
        }
        let head = self.selection.head;
        self.set_head(head.saturating_sub(1), extend);
    }

    fn move_right(&mut self, extend: bool) {
        if !extend && !self.selection.is_collapsed() {
            self.set_head(self.selection.end(), false);
            return;
        }
        let head = self.selection.head;
        self.set_head(head + 1, extend);
    }
}

impl Default for RichBuffer {
    fn default() -> Self {
        Self::from_text("")
    }
}

impl std::fmt::Debug for RichBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RichBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("runs", &self.runs.as_slice().len())
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::format::Background;

    fn bold() -> Attributes {
        Attributes::default().with(Attribute::Bold(true))
    }

    // --- Construction ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = RichBuffer::from_text("");
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.len_chars(), 0);
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = RichBuffer::from_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.text(), "hello\nworld");
        assert_eq!(buf.runs().len(), buf.len_chars());
    }

    #[test]
    fn test_line_range_excludes_newline() {
        let buf = RichBuffer::from_text("hello\nworld");
        assert_eq!(buf.line_range(0), 0..5);
        assert_eq!(buf.line_range(1), 6..11);
    }

    #[test]
    fn test_line_range_out_of_bounds_is_empty() {
        let buf = RichBuffer::from_text("hi");
        assert_eq!(buf.line_range(9), 2..2);
    }

    // --- Editing ---

    #[test]
    fn test_insert_text_moves_cursor() {
        let mut buf = RichBuffer::from_text("");
        buf.insert_text("abc");
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.selection(), Selection::caret(3));
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut buf = RichBuffer::from_text("hello world");
        buf.place(0);
        buf.extend_to(5);
        let edits = buf.insert_text("howdy");
        assert_eq!(buf.text(), "howdy world");
        assert_eq!(edits.len(), 2);
        assert!(matches!(edits[0], Edit::Delete { .. }));
        assert!(matches!(edits[1], Edit::Insert { .. }));
    }

    #[test]
    fn test_typed_text_inherits_previous_formatting() {
        let mut buf = RichBuffer::from_text("ab");
        buf.restyle(Range { index: 0, length: 2 }, Attribute::Bold(true));
        buf.place(2);
        buf.insert_text("c");
        assert_eq!(buf.runs().attrs_at(2), bold());
    }

    #[test]
    fn test_text_at_start_is_plain() {
        let mut buf = RichBuffer::from_text("ab");
        buf.restyle(Range { index: 0, length: 2 }, Attribute::Bold(true));
        buf.place(0);
        buf.insert_text("z");
        assert_eq!(buf.runs().attrs_at(0), Attributes::default());
    }

    #[test]
    fn test_insert_multibyte_char() {
        let mut buf = RichBuffer::from_text("ab");
        buf.place(1);
        buf.insert_text("é");
        assert_eq!(buf.text(), "aéb");
        assert_eq!(buf.selection().head, 2);
    }

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut buf = RichBuffer::from_text("hello");
        assert!(buf.delete_back().is_empty());
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_delete_back_removes_char() {
        let mut buf = RichBuffer::from_text("hello");
        buf.place(3);
        buf.delete_back();
        assert_eq!(buf.text(), "helo");
        assert_eq!(buf.selection(), Selection::caret(2));
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = RichBuffer::from_text("hello\nworld");
        buf.place(6);
        buf.delete_back();
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buf = RichBuffer::from_text("hi");
        buf.move_to_end(false);
        assert!(buf.delete_forward().is_empty());
    }

    #[test]
    fn test_delete_forward_removes_selection() {
        let mut buf = RichBuffer::from_text("hello world");
        buf.place(5);
        buf.extend_to(11);
        buf.delete_forward();
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_delete_keeps_runs_aligned() {
        let mut buf = RichBuffer::from_text("abcdef");
        buf.restyle(Range { index: 1, length: 3 }, Attribute::Bold(true));
        buf.place(2);
        buf.extend_to(5);
        buf.delete_back();
        assert_eq!(buf.text(), "abf");
        assert_eq!(buf.runs().len(), 3);
        assert_eq!(buf.runs().attrs_at(1), bold());
    }

    // --- Formatting ---

    #[test]
    fn test_restyle_empty_range_is_none() {
        let mut buf = RichBuffer::from_text("abc");
        assert!(
            buf.restyle(Range { index: 1, length: 0 }, Attribute::Bold(true))
                .is_none()
        );
    }

    #[test]
    fn test_restyle_clamps_to_buffer() {
        let mut buf = RichBuffer::from_text("abc");
        let edit = buf
            .restyle(
                Range {
                    index: 1,
                    length: 99,
                },
                Attribute::Background(Some(Background::COMMENT)),
            )
            .unwrap();
        assert_eq!(edit.landing(), 3);
        assert_eq!(buf.runs().len(), 3);
    }

    #[test]
    fn test_apply_inverse_restores_text_and_runs() {
        let mut buf = RichBuffer::from_text("hello");
        buf.restyle(Range { index: 0, length: 5 }, Attribute::Bold(true));
        buf.place(1);
        buf.extend_to(4);
        let edits = buf.delete_back();
        for edit in edits.iter().rev() {
            buf.apply(&edit.inverse());
        }
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.runs().attrs_at(3), bold());
    }

    // --- Cursor movement ---

    #[test]
    fn test_move_left_collapses_selection_to_start() {
        let mut buf = RichBuffer::from_text("hello");
        buf.place(1);
        buf.extend_to(4);
        buf.move_cursor(Direction::Left, false);
        assert_eq!(buf.selection(), Selection::caret(1));
    }

    #[test]
    fn test_shift_right_extends_selection() {
        let mut buf = RichBuffer::from_text("hello");
        buf.move_cursor(Direction::Right, true);
        buf.move_cursor(Direction::Right, true);
        assert_eq!(buf.selection().range(), Range { index: 0, length: 2 });
    }

    #[test]
    fn test_move_right_at_end_is_noop() {
        let mut buf = RichBuffer::from_text("hello");
        buf.move_end(false);
        buf.move_cursor(Direction::Right, false);
        assert_eq!(buf.selection(), Selection::caret(5));
    }

    #[test]
    fn test_move_up_preserves_column() {
        let mut buf = RichBuffer::from_text("hello\nworld");
        buf.place(9);
        buf.move_cursor(Direction::Up, false);
        assert_eq!(buf.selection(), Selection::caret(3));
    }

    #[test]
    fn test_column_memory_across_short_line() {
        let mut buf = RichBuffer::from_text("hello\nhi\nworld");
        buf.place(4);
        buf.move_cursor(Direction::Down, false);
        assert_eq!(buf.selection().head, 8);
        buf.move_cursor(Direction::Down, false);
        assert_eq!(buf.selection().head, 13);
    }

    #[test]
    fn test_move_word_right_skips_word_and_gap() {
        let mut buf = RichBuffer::from_text("hello big world");
        buf.move_word_right(false);
        assert_eq!(buf.selection().head, 6);
        buf.move_word_right(false);
        assert_eq!(buf.selection().head, 10);
    }

    #[test]
    fn test_move_word_left_lands_on_word_start() {
        let mut buf = RichBuffer::from_text("hello big world");
        buf.move_to_end(false);
        buf.move_word_left(false);
        assert_eq!(buf.selection().head, 10);
        buf.move_word_left(true);
        assert_eq!(buf.selection().range(), Range { index: 6, length: 4 });
    }

    #[test]
    fn test_select_all_covers_buffer() {
        let mut buf = RichBuffer::from_text("one\ntwo");
        buf.select_all();
        assert_eq!(buf.selection().range(), Range { index: 0, length: 7 });
    }

    #[test]
    fn test_home_and_end_stay_on_line() {
        let mut buf = RichBuffer::from_text("one\ntwo");
        buf.place(5);
        buf.move_home(false);
        assert_eq!(buf.selection().head, 4);
        buf.move_end(true);
        assert_eq!(buf.selection().range(), Range { index: 4, length: 3 });
    }

    // --- Display columns ---

    #[test]
    fn test_display_col_counts_wide_chars() {
        let buf = RichBuffer::from_text("a漢b");
        assert_eq!(buf.display_col(2), 3);
        assert_eq!(buf.index_at_display(0, 3), 2);
        assert_eq!(buf.index_at_display(0, 2), 1);
    }

    #[test]
    fn test_index_at_display_clamps_past_line_end() {
        let buf = RichBuffer::from_text("hi\nthere");
        assert_eq!(buf.index_at_display(0, 40), 2);
        assert_eq!(buf.index_at_display(7, 1), 4);
    }
}
