use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let editor_info = model.editor.ready().map_or_else(
        |_| "  editor loading".to_string(),
        |editor| {
            let chars = editor.text().chars().count();
            let selected = editor.selection().map_or(0, |range| range.length);
            if selected > 0 {
                format!("  {chars} chars  {selected} selected")
            } else {
                format!("  {chars} chars")
            }
        },
    );

    let status = format!(
        " {}{}  rate {}%  F1:help  Ctrl+Q:quit",
        model.user, editor_info, model.rate
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(message) = model.active_toast() else {
        return;
    };
    let toast = Paragraph::new(format!("[warn] {message}"))
        .style(Style::default().bg(Color::Yellow).fg(Color::Black));
    frame.render_widget(toast, area);
}
