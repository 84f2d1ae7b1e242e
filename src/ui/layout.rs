use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, Padding};
use unicode_width::UnicodeWidthStr;

use crate::header::{HeaderControls, HeaderField};
use crate::toolbar::ToolbarPosition;

pub const UNDO_LABEL: &str = "[ \u{21b6} Undo ]";
pub const REDO_LABEL: &str = "[ \u{21b7} Redo ]";

pub const BOLD_LABEL: &str = "[Bold]";
pub const RATE_LABEL: &str = "Rate: ";
pub const COMMENT_LABEL: &str = "[Comment]";
/// Slider cells; each cell is five rate units.
pub const SLIDER_WIDTH: u16 = 21;

/// Screen regions shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub editor_block: Rect,
    /// Text area inside the editor's border and padding.
    pub editor_content: Rect,
    pub transport: Rect,
    pub undo_button: Rect,
    pub redo_button: Rect,
    pub footer: Rect,
}

pub fn editor_block<'a>() -> Block<'a> {
    Block::bordered()
        .title(" Document ")
        .padding(Padding::horizontal(1))
}

pub fn app_layout(area: Rect) -> AppLayout {
    let [header, editor_block_area, transport, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let editor_content = editor_block().inner(editor_block_area);
    let undo_button = Rect::new(
        transport.x.saturating_add(1),
        transport.y,
        text_width(UNDO_LABEL),
        transport.height,
    )
    .intersection(transport);
    let redo_button = Rect::new(
        undo_button.right().saturating_add(2),
        transport.y,
        text_width(REDO_LABEL),
        transport.height,
    )
    .intersection(transport);

    AppLayout {
        header,
        editor_block: editor_block_area,
        editor_content,
        transport,
        undo_button,
        redo_button,
        footer,
    }
}

/// Header text for the user badge.
pub fn user_badge(user: &str) -> String {
    format!("\u{25c9} {user}")
}

/// Text of one header control, e.g. `Pitch [1.0]`.
pub fn header_control_text(field: HeaderField, controls: &HeaderControls) -> String {
    format!("{} [{}]", field.label(), controls.get(field))
}

/// Hit areas of the pitch/volume/rate controls, left to right after the user
/// badge.
pub fn header_control_rects(
    header: Rect,
    user: &str,
    controls: &HeaderControls,
) -> Vec<(HeaderField, Rect)> {
    let mut x = header
        .x
        .saturating_add(1)
        .saturating_add(text_width(&user_badge(user)))
        .saturating_add(4);
    HeaderField::ALL
        .iter()
        .map(|&field| {
            let width = text_width(&header_control_text(field, controls));
            let rect = Rect::new(x, header.y, width, header.height).intersection(header);
            x = x.saturating_add(width).saturating_add(2);
            (field, rect)
        })
        .collect()
}

/// Geometry of the floating toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarLayout {
    pub area: Rect,
    pub bold: Rect,
    pub slider: Rect,
    pub rate_value: Rect,
    pub comment: Rect,
}

pub fn toolbar_width() -> u16 {
    // padding, bold, gap, label, slider, space + value, gap, comment, padding
    1 + text_width(BOLD_LABEL)
        + 2
        + text_width(RATE_LABEL)
        + SLIDER_WIDTH
        + 4
        + 2
        + text_width(COMMENT_LABEL)
        + 1
}

/// Toolbar geometry at `position`, kept inside `frame`.
pub fn toolbar_layout(position: ToolbarPosition, frame: Rect) -> ToolbarLayout {
    let width = toolbar_width().min(frame.width);
    let max_left = i32::from(frame.right().saturating_sub(width));
    let max_top = i32::from(frame.bottom().saturating_sub(1));
    let left = clamp_to_u16(position.left, i32::from(frame.x), max_left);
    let top = clamp_to_u16(position.top, i32::from(frame.y), max_top);
    let area = Rect::new(left, top, width, frame.height.min(1));

    let mut x = area.x + 1;
    let mut next = |w: u16, gap: u16| {
        let rect = Rect::new(x, area.y, w, area.height).intersection(area);
        x = x.saturating_add(w).saturating_add(gap);
        rect
    };
    let bold = next(text_width(BOLD_LABEL), 2);
    let _label = next(text_width(RATE_LABEL), 0);
    let slider = next(SLIDER_WIDTH, 1);
    let rate_value = next(3, 2);
    let comment = next(text_width(COMMENT_LABEL), 0);

    ToolbarLayout {
        area,
        bold,
        slider,
        rate_value,
        comment,
    }
}

/// Rate value under column `col` of the slider track.
pub fn rate_at_column(slider: Rect, col: u16) -> u8 {
    let span = slider.width.saturating_sub(1).max(1);
    let offset = col.saturating_sub(slider.x).min(span);
    let value = u32::from(offset) * 100 / u32::from(span);
    u8::try_from(value).unwrap_or(100)
}

/// Slider cell holding the knob for `rate`.
pub fn knob_offset(slider: Rect, rate: u8) -> u16 {
    let span = u32::from(slider.width.saturating_sub(1));
    let offset = (u32::from(rate.min(100)) * span + 50) / 100;
    u16::try_from(offset).unwrap_or(0)
}

pub const fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

fn clamp_to_u16(value: i32, min: i32, max: i32) -> u16 {
    let clamped = value.clamp(min, max.max(min));
    u16::try_from(clamped).unwrap_or(0)
}

fn text_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stacks_regions() {
        let layout = app_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.header, Rect::new(0, 0, 80, 1));
        assert_eq!(layout.editor_block, Rect::new(0, 1, 80, 21));
        assert_eq!(layout.editor_content, Rect::new(2, 2, 76, 19));
        assert_eq!(layout.transport.y, 22);
        assert_eq!(layout.footer.y, 23);
    }

    #[test]
    fn test_transport_buttons_do_not_overlap() {
        let layout = app_layout(Rect::new(0, 0, 80, 24));
        assert!(layout.undo_button.right() < layout.redo_button.x);
        assert_eq!(layout.undo_button.y, layout.transport.y);
    }

    #[test]
    fn test_toolbar_at_position() {
        let frame = Rect::new(0, 0, 120, 40);
        let layout = toolbar_layout(ToolbarPosition { top: 5, left: 10 }, frame);
        assert_eq!(layout.area.x, 10);
        assert_eq!(layout.area.y, 5);
        assert_eq!(layout.area.width, toolbar_width());
        assert_eq!(layout.bold.x, 11);
        assert_eq!(layout.slider.width, SLIDER_WIDTH);
        assert!(layout.slider.x > layout.bold.right());
        assert!(layout.comment.x > layout.rate_value.right());
        assert!(layout.comment.right() < layout.area.right());
    }

    #[test]
    fn test_toolbar_is_clamped_into_frame() {
        let frame = Rect::new(0, 0, 80, 24);
        let layout = toolbar_layout(ToolbarPosition { top: 50, left: 70 }, frame);
        assert_eq!(layout.area.y, 23);
        assert_eq!(layout.area.right(), 80);

        let above = toolbar_layout(ToolbarPosition { top: -4, left: -3 }, frame);
        assert_eq!((above.area.x, above.area.y), (0, 0));
    }

    #[test]
    fn test_rate_at_column_spans_zero_to_hundred() {
        let slider = Rect::new(10, 0, SLIDER_WIDTH, 1);
        assert_eq!(rate_at_column(slider, 10), 0);
        assert_eq!(rate_at_column(slider, 20), 50);
        assert_eq!(rate_at_column(slider, 30), 100);
        assert_eq!(rate_at_column(slider, 99), 100);
        assert_eq!(rate_at_column(slider, 0), 0);
    }

    #[test]
    fn test_knob_offset_matches_rate_at_column() {
        let slider = Rect::new(0, 0, SLIDER_WIDTH, 1);
        for rate in [0u8, 25, 50, 75, 100] {
            let offset = knob_offset(slider, rate);
            assert_eq!(rate_at_column(slider, offset), rate - rate % 5);
        }
    }

    #[test]
    fn test_header_controls_follow_user_badge() {
        let controls = HeaderControls::default();
        let rects = header_control_rects(Rect::new(0, 0, 80, 1), "Adele", &controls);
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0].0, HeaderField::Pitch);
        // " ◉ Adele" then four spaces
        assert_eq!(rects[0].1.x, 12);
        assert_eq!(rects[0].1.width, 11);
        assert!(rects[1].1.x > rects[0].1.right());
        assert_eq!(rects[2].0, HeaderField::Rate);
    }
}
