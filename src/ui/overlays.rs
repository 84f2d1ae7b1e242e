use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::app::Model;
use crate::toolbar::{CommentPrompt, ToolbarPosition};

use super::layout::{self, BOLD_LABEL, COMMENT_LABEL, RATE_LABEL};
use super::{TOOLBAR_BG, rgb};

pub fn render_toolbar(model: &Model, position: ToolbarPosition, frame: &mut Frame, area: Rect) {
    let geometry = layout::toolbar_layout(position, area);
    let base = Style::default().bg(rgb(TOOLBAR_BG)).fg(Color::White);
    let button = Style::default()
        .bg(Color::Indexed(240))
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    frame.render_widget(Clear, geometry.area);
    frame.render_widget(Block::default().style(base), geometry.area);
    frame.render_widget(Paragraph::new(BOLD_LABEL).style(button), geometry.bold);

    let label_area = Rect {
        x: geometry.bold.right().saturating_add(2),
        width: geometry.slider.x.saturating_sub(geometry.bold.right().saturating_add(2)),
        ..geometry.bold
    };
    frame.render_widget(Paragraph::new(RATE_LABEL).style(base), label_area);

    let knob = layout::knob_offset(geometry.slider, model.rate.value());
    let track: Vec<Span> = (0..geometry.slider.width)
        .map(|cell| match cell.cmp(&knob) {
            std::cmp::Ordering::Less => Span::styled("\u{2501}", base.fg(Color::Yellow)),
            std::cmp::Ordering::Equal => Span::styled(
                "\u{25cf}",
                base.fg(if model.rate_dragging {
                    Color::LightYellow
                } else {
                    Color::White
                }),
            ),
            std::cmp::Ordering::Greater => Span::styled("\u{2500}", base.fg(Color::Indexed(246))),
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(track)), geometry.slider);
    frame.render_widget(
        Paragraph::new(format!("{:>3}", model.rate)).style(base),
        geometry.rate_value,
    );
    frame.render_widget(Paragraph::new(COMMENT_LABEL).style(button), geometry.comment);
}

/// Popup area of the comment prompt.
pub fn comment_prompt_rect(area: Rect) -> Rect {
    let width = area.width.saturating_sub(16).clamp(24, 60);
    centered_popup_rect(width, 7, area)
}

pub fn render_comment_prompt(prompt: &CommentPrompt, frame: &mut Frame, area: Rect) {
    let popup = comment_prompt_rect(area);
    let block = Block::default()
        .title("Add your comment:")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(popup);

    let field_width = usize::from(inner.width.saturating_sub(1));
    let input = prompt.input();
    let skip = input.chars().count().saturating_sub(field_width);
    let visible: String = input.chars().skip(skip).collect();
    let lines = vec![
        Line::raw(""),
        Line::styled(
            format!("{visible:<field_width$}"),
            Style::default().bg(Color::Indexed(236)),
        ),
        Line::raw(""),
        Line::styled(
            "Enter: add \u{2502} Esc: cancel",
            Style::default().fg(Color::Indexed(245)),
        ),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);

    let cursor_col = u16::try_from(visible.chars().count()).unwrap_or(0);
    if inner.height > 1 {
        frame.set_cursor_position((inner.x + cursor_col.min(inner.width.saturating_sub(1)), inner.y + 1));
    }
}

pub fn render_notice(message: &str, frame: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(16).clamp(24, 60);
    let popup = centered_popup_rect(width, 7, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let lines = vec![
        Line::raw(message.to_string()),
        Line::raw(""),
        Line::styled(
            "Press any key to continue",
            Style::default().fg(Color::Indexed(245)),
        ),
    ];
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        popup,
    );
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("Editing", section_style));
    lines.push(Line::raw("  Arrows, Home/End    Move cursor"));
    lines.push(Line::raw("  Shift+movement      Extend selection"));
    lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    lines.push(Line::raw("  Ctrl+Home/End       Document start / end"));
    lines.push(Line::raw("  Ctrl+A              Select all"));
    lines.push(Line::raw("  Ctrl+Z              Undo"));
    lines.push(Line::raw("  Ctrl+Y/Ctrl+Shift+Z Redo"));
    lines.push(Line::raw("  Mouse drag          Select text"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Selection toolbar", section_style));
    lines.push(Line::raw("  Alt+B               Bold"));
    lines.push(Line::raw("  Alt+Left/Right      Adjust rate"));
    lines.push(Line::raw("  Alt+R               Highlight at rate"));
    lines.push(Line::raw("  Alt+C               Comment"));
    lines.push(Line::raw("  Release slider      Highlight at rate"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Other", section_style));
    lines.push(Line::raw("  Wheel on header     Adjust pitch/volume/rate"));
    lines.push(Line::raw("  Ctrl+Q / Ctrl+C     Quit"));
    lines.push(Line::raw("  F1                  Toggle help"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));
    lines.push(Line::raw(""));
    lines.push(Line::styled("Any key closes", dim_style));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
