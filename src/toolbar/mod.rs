//! Selection-driven floating toolbar.
//!
//! The toolbar is a two-state machine driven only by the most recent
//! selection change: a non-empty range shows it below the selection, anything
//! else hides it. Its buttons map to [`FormatAction`]s applied through the
//! editor's formatting capability.

mod comment;
mod position;
mod rate;

pub use comment::{CommentOutcome, CommentPrompt, confirmation};
pub use position::{ContainerRect, ScrollOffset, ToolbarPosition, position_below};
pub use rate::Rate;

use crate::editor::{Attribute, Background, Range, SelectionChange};

/// A shown toolbar and the selection it was placed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatingToolbar {
    pub range: Range,
    pub position: ToolbarPosition,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolbarState {
    #[default]
    Hidden,
    Shown(FloatingToolbar),
}

impl ToolbarState {
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Shown(_))
    }

    pub const fn toolbar(&self) -> Option<&FloatingToolbar> {
        match self {
            Self::Shown(toolbar) => Some(toolbar),
            Self::Hidden => None,
        }
    }
}

/// Next toolbar state after a selection change.
///
/// `locate` resolves the page position for a range and returns `None` when
/// the editor or its container is not available yet; the toolbar then stays
/// hidden. Range and position are derived fresh on every show.
pub fn on_selection_change(
    change: &SelectionChange,
    locate: impl FnOnce(Range) -> Option<ToolbarPosition>,
) -> ToolbarState {
    let Some(range) = change.range.filter(|range| !range.is_empty()) else {
        return ToolbarState::Hidden;
    };
    locate(range).map_or(ToolbarState::Hidden, |position| {
        ToolbarState::Shown(FloatingToolbar { range, position })
    })
}

/// A formatting command issued from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatAction {
    Bold,
    RateHighlight(Rate),
    Comment,
}

impl FormatAction {
    /// The attribute this action applies.
    pub const fn attribute(self) -> Attribute {
        match self {
            Self::Bold => Attribute::Bold(true),
            Self::RateHighlight(rate) => Attribute::Background(Some(rate.highlight())),
            Self::Comment => Attribute::Background(Some(Background::COMMENT)),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::RateHighlight(_) => "rate highlight",
            Self::Comment => "comment",
        }
    }
}
