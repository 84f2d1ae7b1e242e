use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};
use crate::editor::{Direction, EditInput};
use crate::ui::layout::{self, contains};

use super::event_loop::ResizeDebouncer;

/// Rate units moved per Alt+Left/Right.
const RATE_KEY_STEP: i16 = 5;
/// Editor lines per mouse wheel notch.
const WHEEL_LINES: i32 = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if model.notice.is_some() {
            return Some(Message::DismissNotice);
        }

        if let Some(prompt) = model.comment.as_ref() {
            return match key.code {
                KeyCode::Esc => Some(Message::CancelComment),
                KeyCode::Enter => Some(Message::SubmitComment),
                KeyCode::Backspace => {
                    let mut next = prompt.input().to_string();
                    next.pop();
                    Some(Message::CommentInput(next))
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    let mut next = prompt.input().to_string();
                    next.push(c);
                    Some(Message::CommentInput(next))
                }
                _ => None,
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        // Application
        match key.code {
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::Char('q' | 'c') if ctrl => return Some(Message::Quit),
            KeyCode::Char('z' | 'Z') if ctrl && shift => return Some(Message::Redo),
            KeyCode::Char('Z') if ctrl => return Some(Message::Redo),
            KeyCode::Char('z') if ctrl => return Some(Message::Undo),
            KeyCode::Char('y') if ctrl => return Some(Message::Redo),
            KeyCode::Char('a') if ctrl => return Some(Message::Edit(EditInput::SelectAll)),
            _ => {}
        }

        // Floating toolbar shortcuts
        if alt {
            if !model.toolbar.is_visible() {
                return None;
            }
            return match key.code {
                KeyCode::Char('b') => Some(Message::Bold),
                KeyCode::Char('c') => Some(Message::StartComment),
                KeyCode::Char('r') => Some(Message::RateRelease),
                KeyCode::Left => Some(Message::RateInput(model.rate.step(-RATE_KEY_STEP).value())),
                KeyCode::Right => Some(Message::RateInput(model.rate.step(RATE_KEY_STEP).value())),
                _ => None,
            };
        }

        let extend = shift;
        let input = match key.code {
            KeyCode::Char(c) if !ctrl => EditInput::InsertChar(c),
            KeyCode::Enter => EditInput::InsertNewline,
            KeyCode::Backspace => EditInput::DeleteBack,
            KeyCode::Delete => EditInput::DeleteForward,
            KeyCode::Left if ctrl => EditInput::MoveWordLeft { extend },
            KeyCode::Right if ctrl => EditInput::MoveWordRight { extend },
            KeyCode::Home if ctrl => EditInput::MoveToStart { extend },
            KeyCode::End if ctrl => EditInput::MoveToEnd { extend },
            KeyCode::Left => EditInput::Move {
                direction: Direction::Left,
                extend,
            },
            KeyCode::Right => EditInput::Move {
                direction: Direction::Right,
                extend,
            },
            KeyCode::Up => EditInput::Move {
                direction: Direction::Up,
                extend,
            },
            KeyCode::Down => EditInput::Move {
                direction: Direction::Down,
                extend,
            },
            KeyCode::Home => EditInput::MoveHome { extend },
            KeyCode::End => EditInput::MoveEnd { extend },
            KeyCode::PageUp => EditInput::MovePage { up: true, extend },
            KeyCode::PageDown => EditInput::MovePage { up: false, extend },
            _ => return None,
        };
        Some(Message::Edit(input))
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        let (col, row) = (mouse.column, mouse.row);
        let left_down = matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left));
        let left_up = matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left));

        if model.help_visible {
            return left_up.then_some(Message::HideHelp);
        }
        if model.notice.is_some() {
            return left_up.then_some(Message::DismissNotice);
        }
        if model.comment.is_some() {
            let popup = crate::ui::comment_prompt_rect(model.frame_area());
            return (left_up && !contains(popup, col, row)).then_some(Message::CancelComment);
        }

        let area = model.frame_area();
        let app_layout = model.layout();

        // Floating toolbar sits above everything else
        if let Some(toolbar) = model.toolbar.toolbar() {
            let geometry = layout::toolbar_layout(toolbar.position, area);
            if model.rate_dragging {
                return match mouse.kind {
                    MouseEventKind::Drag(MouseButton::Left) => Some(Message::RateInput(
                        layout::rate_at_column(geometry.slider, col),
                    )),
                    MouseEventKind::Up(MouseButton::Left) => Some(Message::RateRelease),
                    // A press while dragging means the release was lost
                    MouseEventKind::Down(MouseButton::Left)
                        if contains(geometry.slider, col, row) =>
                    {
                        Some(Message::RatePress(layout::rate_at_column(
                            geometry.slider,
                            col,
                        )))
                    }
                    MouseEventKind::Down(MouseButton::Left) => Some(Message::RateCancel),
                    _ => None,
                };
            }
            if contains(geometry.area, col, row) {
                if left_down && contains(geometry.slider, col, row) {
                    return Some(Message::RatePress(layout::rate_at_column(
                        geometry.slider,
                        col,
                    )));
                }
                if left_up && contains(geometry.bold, col, row) {
                    return Some(Message::Bold);
                }
                if left_up && contains(geometry.comment, col, row) {
                    return Some(Message::StartComment);
                }
                return None;
            }
        }

        // Undo / Redo buttons
        if left_up && contains(app_layout.undo_button, col, row) {
            return Some(Message::Undo);
        }
        if left_up && contains(app_layout.redo_button, col, row) {
            return Some(Message::Redo);
        }

        // Header controls step on the wheel
        if contains(app_layout.header, col, row) {
            let delta = match mouse.kind {
                MouseEventKind::ScrollUp => 1,
                MouseEventKind::ScrollDown => -1,
                _ => return None,
            };
            return layout::header_control_rects(app_layout.header, &model.user, &model.header)
                .into_iter()
                .find(|(_, rect)| contains(*rect, col, row))
                .map(|(field, _)| Message::HeaderStep(field, delta));
        }

        Self::editor_mouse(mouse, model, app_layout.editor_content)
    }

    fn editor_mouse(mouse: MouseEvent, model: &Model, content: Rect) -> Option<Message> {
        let (col, row) = (mouse.column, mouse.row);
        let inside = contains(content, col, row);
        let input = match mouse.kind {
            MouseEventKind::ScrollUp if inside => EditInput::Scroll(-WHEEL_LINES),
            MouseEventKind::ScrollDown if inside => EditInput::Scroll(WHEEL_LINES),
            MouseEventKind::Down(MouseButton::Left) if inside => {
                EditInput::PlaceCursor(editor_index(model, content, col, row)?)
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                EditInput::ExtendTo(editor_index(model, content, col, row)?)
            }
            _ => return None,
        };
        Some(Message::Edit(input))
    }
}

/// Char index under a screen cell, clamped into the content area.
fn editor_index(model: &Model, content: Rect, col: u16, row: u16) -> Option<usize> {
    if content.is_empty() {
        return None;
    }
    let editor = model.editor.ready().ok()?;
    let rel_col = col.clamp(content.x, content.right() - 1) - content.x;
    let rel_row = row.clamp(content.y, content.bottom() - 1) - content.y;
    Some(editor.index_at(rel_row, rel_col))
}
