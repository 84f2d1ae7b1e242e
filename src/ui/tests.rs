use super::*;
use crate::app::{Message, Model, update};
use crate::editor::{EditInput, EditorHandle, EditorOptions, RichTextEditor};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::Modifier;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn mounted_model(text: &str) -> Model {
    let mut handle = EditorHandle::default();
    handle.mount(Box::new(RichTextEditor::with_text(
        EditorOptions::default(),
        text,
    )));
    Model::new(handle, (80, 24))
}

fn select(model: Model, index: usize, length: usize) -> Model {
    let model = update(model, Message::Edit(EditInput::PlaceCursor(index)));
    update(model, Message::Edit(EditInput::ExtendTo(index + length)))
}

fn draw(model: &Model) -> Terminal<TestBackend> {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal
}

fn row_text(buffer: &Buffer, row: u16) -> String {
    (0..buffer.area.width)
        .map(|col| buffer[(col, row)].symbol())
        .collect()
}

fn screen_text(buffer: &Buffer) -> String {
    (0..buffer.area.height)
        .map(|row| row_text(buffer, row))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_header_shows_user_and_controls() {
    let terminal = draw(&mounted_model(""));
    let header = row_text(terminal.backend().buffer(), 0);
    assert!(header.contains("\u{25c9} Adele"), "{header}");
    assert!(header.contains("Pitch"), "{header}");
    assert!(header.contains("Volume"), "{header}");
    assert!(header.contains("Rate"), "{header}");
    assert!(header.contains("1.0"), "{header}");
}

#[test]
fn test_header_reflects_stepped_control() {
    let model = update(
        mounted_model(""),
        Message::HeaderStep(crate::header::HeaderField::Volume, 5),
    );
    let terminal = draw(&model);
    let header = row_text(terminal.backend().buffer(), 0);
    assert!(header.contains("1.5"), "{header}");
}

#[test]
fn test_document_text_renders_inside_editor_block() {
    let model = mounted_model("hello world\nsecond line");
    let terminal = draw(&model);
    let buffer = terminal.backend().buffer();
    let content = model.layout().editor_content;

    assert!(row_text(buffer, content.y).contains("hello world"));
    assert!(row_text(buffer, content.y + 1).contains("second line"));
    assert!(row_text(buffer, content.y - 1).contains("Document"));
}

#[test]
fn test_transport_row_has_undo_and_redo() {
    let model = mounted_model("");
    let terminal = draw(&model);
    let row = row_text(terminal.backend().buffer(), model.layout().transport.y);
    assert!(row.contains("Undo"), "{row}");
    assert!(row.contains("Redo"), "{row}");
}

#[test]
fn test_unmounted_editor_shows_placeholder() {
    let model = Model::new(EditorHandle::default(), (80, 24));
    let terminal = draw(&model);
    let text = screen_text(terminal.backend().buffer());
    assert!(text.contains("Loading editor"), "{text}");
    assert!(text.contains("editor loading"), "{text}");
}

#[test]
fn test_status_bar_counts_chars_and_selection() {
    let model = select(mounted_model("hello world"), 0, 5);
    let terminal = draw(&model);
    let footer = row_text(terminal.backend().buffer(), model.layout().footer.y);
    assert!(footer.contains("11 chars"), "{footer}");
    assert!(footer.contains("5 selected"), "{footer}");
    assert!(footer.contains("rate 50%"), "{footer}");
}

#[test]
fn test_toast_replaces_status_bar() {
    let model = update(Model::new(EditorHandle::default(), (80, 24)), Message::Undo);
    let terminal = draw(&model);
    let footer = row_text(terminal.backend().buffer(), model.layout().footer.y);
    assert!(footer.contains("[warn] Cannot undo"), "{footer}");
}

#[test]
fn test_toolbar_hidden_without_selection() {
    let terminal = draw(&mounted_model("hello world"));
    let text = screen_text(terminal.backend().buffer());
    assert!(!text.contains(layout::BOLD_LABEL));
    assert!(!text.contains(layout::COMMENT_LABEL));
}

#[test]
fn test_toolbar_renders_below_selection() {
    let model = select(mounted_model("hello world"), 0, 5);
    let position = model.toolbar.toolbar().unwrap().position;
    let terminal = draw(&model);
    let row = row_text(
        terminal.backend().buffer(),
        u16::try_from(position.top).unwrap(),
    );
    assert!(row.contains(layout::BOLD_LABEL), "{row}");
    assert!(row.contains(layout::RATE_LABEL.trim_end()), "{row}");
    assert!(row.contains("\u{25cf}"), "{row}");
    assert!(row.contains(" 50"), "{row}");
    assert!(row.contains(layout::COMMENT_LABEL), "{row}");
}

#[test]
fn test_toolbar_slider_value_follows_rate() {
    let model = select(mounted_model("hello world"), 0, 5);
    let model = update(model, Message::RateInput(85));
    let position = model.toolbar.toolbar().unwrap().position;
    let terminal = draw(&model);
    let row = row_text(
        terminal.backend().buffer(),
        u16::try_from(position.top).unwrap(),
    );
    assert!(row.contains(" 85"), "{row}");
}

#[test]
fn test_bold_text_renders_with_bold_modifier() {
    let model = update(select(mounted_model("hello world"), 0, 5), Message::Bold);
    let terminal = draw(&model);
    let buffer = terminal.backend().buffer();
    let content = model.layout().editor_content;

    let bold_cell = &buffer[(content.x, content.y)];
    assert!(bold_cell.modifier.contains(Modifier::BOLD));
    let plain_cell = &buffer[(content.x + 6, content.y)];
    assert!(!plain_cell.modifier.contains(Modifier::BOLD));
}

#[test]
fn test_comment_prompt_overlay() {
    let model = update(select(mounted_model("hello world"), 0, 5), Message::StartComment);
    let model = update(model, Message::CommentInput("check this".to_string()));
    let terminal = draw(&model);
    let text = screen_text(terminal.backend().buffer());
    assert!(text.contains("Add your comment:"), "{text}");
    assert!(text.contains("check this"), "{text}");
    assert!(text.contains("Esc: cancel"), "{text}");
}

#[test]
fn test_confirmation_notice_overlay() {
    let model = update(select(mounted_model("hello world"), 0, 5), Message::StartComment);
    let model = update(model, Message::CommentInput("nice".to_string()));
    let model = update(model, Message::SubmitComment);
    let terminal = draw(&model);
    let text = screen_text(terminal.backend().buffer());
    assert!(text.contains("Comment added: \"nice\""), "{text}");
    assert!(text.contains("Press any key to continue"), "{text}");
}

#[test]
fn test_help_overlay_lists_shortcuts() {
    let model = update(mounted_model(""), Message::ToggleHelp);
    let terminal = draw(&model);
    let text = screen_text(terminal.backend().buffer());
    assert!(text.contains("Help"), "{text}");
    assert!(text.contains("Ctrl+Z"), "{text}");
}

#[test]
fn test_cursor_is_placed_in_editor() {
    let model = update(
        mounted_model("hello"),
        Message::Edit(EditInput::PlaceCursor(3)),
    );
    let mut terminal = draw(&model);
    let content = model.layout().editor_content;
    terminal
        .backend_mut()
        .assert_cursor_position((content.x + 3, content.y));
}
