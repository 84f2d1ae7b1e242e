use std::ops::Range;

use super::format::{Attribute, Attributes};

/// A stretch of `len` consecutive characters sharing the same attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub len: usize,
    pub attrs: Attributes,
}

impl Run {
    pub const fn new(len: usize, attrs: Attributes) -> Self {
        Self { len, attrs }
    }
}

/// Total character count covered by a slice of runs.
pub fn total_len(runs: &[Run]) -> usize {
    runs.iter().map(|run| run.len).sum()
}

/// Run-length formatting aligned with the character indices of the text.
///
/// Runs are kept normalized: no zero-length runs and no two adjacent runs
/// with equal attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Runs {
    runs: Vec<Run>,
}

impl Runs {
    /// Plain runs covering `len` characters.
    pub fn plain(len: usize) -> Self {
        let mut runs = Self::default();
        runs.insert(0, &[Run::new(len, Attributes::default())]);
        runs
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        total_len(&self.runs)
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn as_slice(&self) -> &[Run] {
        &self.runs
    }

    /// Attributes of the character at `index` (defaults past the end).
    pub fn attrs_at(&self, index: usize) -> Attributes {
        let mut offset = 0;
        for run in &self.runs {
            if index < offset + run.len {
                return run.attrs;
            }
            offset += run.len;
        }
        Attributes::default()
    }

    /// Copy out the runs covering `range`.
    pub fn slice(&self, range: Range<usize>) -> Vec<Run> {
        let mut out = Vec::new();
        let mut offset = 0;
        for run in &self.runs {
            let start = offset.max(range.start);
            let end = (offset + run.len).min(range.end);
            if start < end {
                out.push(Run::new(end - start, run.attrs));
            }
            offset += run.len;
            if offset >= range.end {
                break;
            }
        }
        out
    }

    /// Insert runs so that they start at `index`.
    pub fn insert(&mut self, index: usize, runs: &[Run]) {
        let at = self.split_at(index);
        self.runs.splice(at..at, runs.iter().copied());
        self.normalize();
    }

    /// Remove the runs covering `range`, returning what was removed.
    pub fn remove(&mut self, range: Range<usize>) -> Vec<Run> {
        let start = self.split_at(range.start);
        let end = self.split_at(range.end);
        let removed = self.runs.drain(start..end).collect();
        self.normalize();
        removed
    }

    /// Overwrite the formatting starting at `index` with `runs`.
    pub fn replace(&mut self, index: usize, runs: &[Run]) {
        let end = index + total_len(runs);
        self.remove(index..end);
        self.insert(index, runs);
    }

    /// Apply `attribute` over `range`, returning the runs before and after.
    pub fn restyle(&mut self, range: Range<usize>, attribute: Attribute) -> (Vec<Run>, Vec<Run>) {
        let before = self.slice(range.clone());
        let after: Vec<Run> = before
            .iter()
            .map(|run| Run::new(run.len, run.attrs.with(attribute)))
            .collect();
        self.replace(range.start, &after);
        (before, after)
    }

    /// Split the run straddling `index` and return the position of the
    /// first run starting at or after it.
    fn split_at(&mut self, index: usize) -> usize {
        let mut offset = 0;
        for i in 0..self.runs.len() {
            if offset == index {
                return i;
            }
            let run = self.runs[i];
            if index < offset + run.len {
                let left = index - offset;
                self.runs[i].len = left;
                self.runs.insert(i + 1, Run::new(run.len - left, run.attrs));
                return i + 1;
            }
            offset += run.len;
        }
        self.runs.len()
    }

    fn normalize(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..).filter(|run| run.len > 0) {
            match merged.last_mut() {
                Some(last) if last.attrs == run.attrs => last.len += run.len,
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::format::Background;

    fn bold() -> Attributes {
        Attributes::default().with(Attribute::Bold(true))
    }

    #[test]
    fn test_plain_covers_length() {
        let runs = Runs::plain(5);
        assert_eq!(runs.len(), 5);
        assert_eq!(runs.as_slice().len(), 1);
    }

    #[test]
    fn test_plain_zero_is_empty() {
        let runs = Runs::plain(0);
        assert!(runs.is_empty());
        assert_eq!(runs.len(), 0);
    }

    #[test]
    fn test_restyle_splits_middle() {
        let mut runs = Runs::plain(10);
        let (before, after) = runs.restyle(3..6, Attribute::Bold(true));
        assert_eq!(before, vec![Run::new(3, Attributes::default())]);
        assert_eq!(after, vec![Run::new(3, bold())]);
        assert_eq!(
            runs.as_slice(),
            &[
                Run::new(3, Attributes::default()),
                Run::new(3, bold()),
                Run::new(4, Attributes::default()),
            ]
        );
        assert_eq!(runs.len(), 10);
    }

    #[test]
    fn test_restyle_twice_is_idempotent() {
        let mut once = Runs::plain(8);
        once.restyle(2..5, Attribute::Bold(true));
        let mut twice = once.clone();
        twice.restyle(2..5, Attribute::Bold(true));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_adjacent_equal_runs_merge() {
        let mut runs = Runs::plain(6);
        runs.restyle(0..3, Attribute::Bold(true));
        runs.restyle(3..6, Attribute::Bold(true));
        assert_eq!(runs.as_slice(), &[Run::new(6, bold())]);
    }

    #[test]
    fn test_remove_returns_removed_runs() {
        let mut runs = Runs::plain(6);
        runs.restyle(2..4, Attribute::Bold(true));
        let removed = runs.remove(1..5);
        assert_eq!(
            removed,
            vec![
                Run::new(1, Attributes::default()),
                Run::new(2, bold()),
                Run::new(1, Attributes::default()),
            ]
        );
        assert_eq!(runs.as_slice(), &[Run::new(2, Attributes::default())]);
    }

    #[test]
    fn test_insert_then_remove_restores_runs() {
        let mut runs = Runs::plain(4);
        let original = runs.clone();
        runs.insert(2, &[Run::new(3, bold())]);
        assert_eq!(runs.len(), 7);
        assert_eq!(runs.attrs_at(2), bold());
        runs.remove(2..5);
        assert_eq!(runs, original);
    }

    #[test]
    fn test_replace_restores_previous_formatting() {
        let mut runs = Runs::plain(5);
        let highlight = Attribute::Background(Some(Background::COMMENT));
        let (before, _) = runs.restyle(1..4, highlight);
        runs.replace(1, &before);
        assert_eq!(runs, Runs::plain(5));
    }

    #[test]
    fn test_attrs_at_past_end_is_default() {
        let mut runs = Runs::plain(2);
        runs.restyle(0..2, Attribute::Bold(true));
        assert_eq!(runs.attrs_at(1), bold());
        assert_eq!(runs.attrs_at(2), Attributes::default());
    }

    #[test]
    fn test_slice_clamps_to_range() {
        let mut runs = Runs::plain(10);
        runs.restyle(4..8, Attribute::Bold(true));
        assert_eq!(
            runs.slice(2..6),
            vec![Run::new(2, Attributes::default()), Run::new(2, bold())]
        );
    }
}
