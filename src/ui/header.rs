use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

use super::layout::{header_control_rects, header_control_text, user_badge};
use super::{PAGE_BG, TEXT_FG, rgb};

pub fn render_header(model: &Model, frame: &mut Frame, area: Rect) {
    let badge = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            user_badge(&model.user),
            Style::default().fg(TEXT_FG).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(badge).style(Style::default().bg(rgb(PAGE_BG))),
        area,
    );

    let label_style = Style::default().fg(Color::Indexed(250));
    let value_style = Style::default().bg(Color::Indexed(236)).fg(TEXT_FG);
    for (field, rect) in header_control_rects(area, &model.user, &model.header) {
        let text = header_control_text(field, &model.header);
        let (label, value) = text.split_at(field.label().len());
        let line = Line::from(vec![
            Span::styled(label.to_string(), label_style),
            Span::raw(" "),
            Span::styled(value.trim_start().to_string(), value_style),
        ]);
        frame.render_widget(Paragraph::new(line), rect);
    }
}
