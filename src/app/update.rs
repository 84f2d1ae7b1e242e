use crate::app::Model;
use crate::editor::{EditInput, EditorCapability, EditorHandle, Range, SelectionChange, Source};
use crate::header::HeaderField;
use crate::toolbar::{
    self, CommentOutcome, CommentPrompt, ContainerRect, FormatAction, Rate, ScrollOffset,
    ToolbarPosition, position_below,
};
use ratatui::layout::Rect;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editor
    /// Forward typing, navigation or mouse selection to the editor
    Edit(EditInput),
    /// Undo the last history entry
    Undo,
    /// Redo the last undone entry
    Redo,

    // Floating toolbar
    /// Bold the selection
    Bold,
    /// Slider pressed at a value
    RatePress(u8),
    /// Slider moved (drag or keyboard); does not format
    RateInput(u8),
    /// Slider released; highlights the selection at the current rate
    RateRelease,
    /// Slider drag ended without a release; nothing is applied
    RateCancel,
    /// Open the comment prompt
    StartComment,
    /// Replace the comment prompt text
    CommentInput(String),
    /// Submit the comment prompt
    SubmitComment,
    /// Dismiss the comment prompt
    CancelComment,
    /// Close the confirmation notice
    DismissNotice,

    // Header
    /// Step a header control by n tenths
    HeaderStep(HeaderField, i8),

    // Help
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Every call into the editor goes through [`with_editor`], so an unmounted
/// editor is reported the same way everywhere.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Editor
        Message::Edit(input) => {
            // Editor input means the slider is no longer held
            model.rate_dragging = false;
            if let Some(change) = with_editor(&mut model, "edit", |editor| {
                editor.handle_input(input)
            })
            .flatten()
            {
                apply_selection_change(&mut model, &change);
            }
        }
        Message::Undo => {
            if let Some(change) = with_editor(&mut model, "undo", |editor| editor.undo()).flatten() {
                apply_selection_change(&mut model, &change);
            }
        }
        Message::Redo => {
            if let Some(change) = with_editor(&mut model, "redo", |editor| editor.redo()).flatten() {
                apply_selection_change(&mut model, &change);
            }
        }

        // Floating toolbar
        Message::Bold => apply_format(&mut model, FormatAction::Bold),
        Message::RatePress(value) => {
            model.rate = Rate::new(value);
            model.rate_dragging = true;
        }
        Message::RateInput(value) => {
            model.rate = Rate::new(value);
        }
        Message::RateRelease => {
            model.rate_dragging = false;
            let rate = model.rate;
            apply_format(&mut model, FormatAction::RateHighlight(rate));
        }
        Message::RateCancel => {
            if model.rate_dragging {
                tracing::debug!("slider drag abandoned: release lost");
            }
            model.rate_dragging = false;
        }
        Message::StartComment => {
            if model.toolbar.is_visible() {
                model.comment = Some(CommentPrompt::new());
            }
        }
        Message::CommentInput(text) => {
            if let Some(prompt) = model.comment.as_mut() {
                *prompt = CommentPrompt::with_input(&text);
            }
        }
        Message::SubmitComment => {
            if let Some(prompt) = model.comment.take() {
                resolve_comment(&mut model, prompt.submit());
            }
        }
        Message::CancelComment => {
            if let Some(prompt) = model.comment.take() {
                resolve_comment(&mut model, prompt.cancel());
            }
        }
        Message::DismissNotice => {
            model.notice = None;
        }

        // Header
        Message::HeaderStep(field, delta) => {
            model.header.step(field, delta);
        }

        // Help
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(width, height) => {
            model.frame_size = (width, height);
            model.sync_editor_viewport();
            relocate_toolbar(&mut model);
        }
        // Redraw: no state change needed
        Message::Redraw => {}

        Message::Quit => {
            model.should_quit = true;
        }
    }

    model
}

/// Run `call` against the mounted editor.
///
/// Returns `None` and raises a warning toast when the editor is not ready.
fn with_editor<T>(
    model: &mut Model,
    action: &str,
    call: impl FnOnce(&mut dyn EditorCapability) -> T,
) -> Option<T> {
    match model.editor.ready_mut() {
        Ok(editor) => Some(call(editor)),
        Err(err) => {
            tracing::warn!(action, %err, "editor call skipped");
            model.show_toast(format!("Cannot {action}: {err}"));
            None
        }
    }
}

/// Feed an editor selection change to the toolbar state machine.
fn apply_selection_change(model: &mut Model, change: &SelectionChange) {
    let container = model.layout().editor_content;
    let editor = &model.editor;
    model.toolbar = toolbar::on_selection_change(change, |range| {
        locate_toolbar(editor, container, range)
    });
    // A drag cannot outlive the slider it started on
    if !model.toolbar.is_visible() && model.rate_dragging {
        tracing::debug!("slider drag abandoned: toolbar hidden");
        model.rate_dragging = false;
    }
    tracing::trace!(
        visible = model.toolbar.is_visible(),
        range = ?change.range,
        "selection changed"
    );
}

/// Page position below `range`, if the editor and its container exist.
fn locate_toolbar(editor: &EditorHandle, container: Rect, range: Range) -> Option<ToolbarPosition> {
    let editor = editor.ready().ok()?;
    if container.is_empty() {
        return None;
    }
    let bounds = editor.bounds(range.index, range.length);
    Some(position_below(
        ContainerRect {
            top: i32::from(container.y),
            left: i32::from(container.x),
        },
        bounds,
        ScrollOffset::default(),
    ))
}

/// Re-derive the toolbar from the editor's current selection after the
/// container moved.
fn relocate_toolbar(model: &mut Model) {
    if !model.toolbar.is_visible() {
        return;
    }
    let range = model.editor.ready().ok().and_then(|editor| editor.selection());
    let change = SelectionChange {
        range,
        previous: range,
        source: Source::Silent,
    };
    apply_selection_change(model, &change);
}

fn apply_format(model: &mut Model, action: FormatAction) {
    let attribute = action.attribute();
    if with_editor(model, action.label(), |editor| {
        editor.format(attribute, Source::Api);
    })
    .is_some()
    {
        tracing::debug!(action = action.label(), "format dispatched");
    }
}

fn resolve_comment(model: &mut Model, outcome: CommentOutcome) {
    match outcome {
        CommentOutcome::Added(text) => {
            let attribute = FormatAction::Comment.attribute();
            let applied = with_editor(model, "comment", |editor| {
                editor.format(attribute, Source::Api);
            })
            .is_some();
            if applied {
                tracing::info!(chars = text.chars().count(), "comment added");
                model.notice = Some(toolbar::confirmation(&text));
            }
        }
        CommentOutcome::Cancelled => tracing::debug!("comment cancelled"),
        CommentOutcome::Empty => tracing::debug!("comment skipped: empty input"),
    }
}
