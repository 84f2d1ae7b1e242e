use crate::editor::Bounds;

/// Screen offset of the editor's content area (the toolbar's container).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerRect {
    pub top: i32,
    pub left: i32,
}

/// Page scroll offset.
///
/// The terminal frame never scrolls, so the app always passes zero; the
/// offset stays part of the formula so positions remain page-absolute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOffset {
    pub x: i32,
    pub y: i32,
}

/// Page position of the floating toolbar's top-left cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolbarPosition {
    pub top: i32,
    pub left: i32,
}

/// Place the toolbar directly below the selection.
///
/// `bounds` are editor-local; the container offset and page scroll convert
/// them to page coordinates.
pub const fn position_below(
    container: ContainerRect,
    bounds: Bounds,
    scroll: ScrollOffset,
) -> ToolbarPosition {
    ToolbarPosition {
        top: container.top + bounds.bottom + scroll.y,
        left: container.left + bounds.left + scroll.x,
    }
}
