use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::app::Model;
use crate::editor::Segment;

use super::layout::{self, AppLayout, REDO_LABEL, UNDO_LABEL};
use super::{EDITOR_BG, PAGE_BG, SELECTION_BG, TEXT_FG, header, overlays, rgb, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = layout::app_layout(area);

    frame.render_widget(
        Block::default().style(Style::default().bg(rgb(PAGE_BG)).fg(TEXT_FG)),
        area,
    );
    header::render_header(model, frame, layout.header);
    render_editor(model, frame, &layout);
    render_transport(frame, &layout);

    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, layout.footer);
    } else {
        status::render_status_bar(model, frame, layout.footer);
    }

    if let Some(toolbar) = model.toolbar.toolbar() {
        overlays::render_toolbar(model, toolbar.position, frame, area);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    } else if let Some(prompt) = &model.comment {
        overlays::render_comment_prompt(prompt, frame, area);
    } else if let Some(notice) = &model.notice {
        overlays::render_notice(notice, frame, area);
    }
}

fn render_editor(model: &Model, frame: &mut Frame, layout: &AppLayout) {
    let block = layout::editor_block()
        .style(Style::default().bg(rgb(EDITOR_BG)).fg(TEXT_FG))
        .border_style(Style::default().fg(Color::Indexed(240)));
    frame.render_widget(block, layout.editor_block);

    let content = layout.editor_content;
    let Ok(editor) = model.editor.ready() else {
        let placeholder = Line::styled("Loading editor\u{2026}", Style::default().fg(Color::Indexed(245)));
        frame.render_widget(Paragraph::new(placeholder), content);
        return;
    };

    let view = editor.view();
    let lines: Vec<Line> = view
        .lines
        .iter()
        .map(|segments| {
            Line::from(
                segments
                    .iter()
                    .map(|segment| Span::styled(segment.text.clone(), segment_style(segment)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), content);

    if !model.modal_active()
        && let Some((col, row)) = view.cursor
        && col < content.width
        && row < content.height
    {
        frame.set_cursor_position((content.x + col, content.y + row));
    }
}

/// Terminal style for a run of editor text.
///
/// Backgrounds are composited over the editor background; light results get
/// dark text.
pub fn segment_style(segment: &Segment) -> Style {
    let background = segment
        .attrs
        .background
        .map_or(EDITOR_BG, |bg| bg.blend_over(EDITOR_BG));
    let fg = if is_light(background) {
        Color::Black
    } else {
        TEXT_FG
    };
    let mut style = Style::default().fg(fg).bg(rgb(background));
    if segment.attrs.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if segment.selected {
        style = style.bg(SELECTION_BG).fg(TEXT_FG);
    }
    style
}

fn is_light((r, g, b): (u8, u8, u8)) -> bool {
    let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    luma > 140_000
}

fn render_transport(frame: &mut Frame, layout: &AppLayout) {
    let style = Style::default().bg(Color::Indexed(238)).fg(TEXT_FG);
    frame.render_widget(Paragraph::new(UNDO_LABEL).style(style), layout.undo_button);
    frame.render_widget(Paragraph::new(REDO_LABEL).style(style), layout.redo_button);
}
