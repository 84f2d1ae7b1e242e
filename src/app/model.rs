use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::editor::EditorHandle;
use crate::header::HeaderControls;
use crate::toolbar::{CommentPrompt, Rate, ToolbarState};
use crate::ui::AppLayout;

pub const DEFAULT_USER: &str = "Adele";

/// A transient warning shown in place of the status bar.
#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The embedded editor; not ready until mounted
    pub editor: EditorHandle,
    /// Floating toolbar, derived from the latest selection change
    pub toolbar: ToolbarState,
    /// Current rate slider value
    pub rate: Rate,
    /// True between slider press and release
    pub rate_dragging: bool,
    /// Pending comment input, if the prompt is open
    pub comment: Option<CommentPrompt>,
    /// Confirmation message waiting to be dismissed
    pub notice: Option<String>,
    /// Pitch/volume/rate header controls
    pub header: HeaderControls,
    /// Name shown in the header
    pub user: String,
    /// Terminal size (columns, rows)
    pub frame_size: (u16, u16),
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("editor", &self.editor)
            .field("toolbar", &self.toolbar)
            .field("rate", &self.rate)
            .field("comment", &self.comment)
            .field("frame_size", &self.frame_size)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model around an editor handle for a terminal of the given size.
    pub fn new(editor: EditorHandle, frame_size: (u16, u16)) -> Self {
        let mut model = Self {
            editor,
            frame_size,
            ..Self::default()
        };
        model.sync_editor_viewport();
        model
    }

    pub const fn frame_area(&self) -> Rect {
        Rect::new(0, 0, self.frame_size.0, self.frame_size.1)
    }

    pub fn layout(&self) -> AppLayout {
        crate::ui::app_layout(self.frame_area())
    }

    /// Whether a modal overlay is capturing input.
    pub const fn modal_active(&self) -> bool {
        self.help_visible || self.comment.is_some() || self.notice.is_some()
    }

    /// Tell the editor how large its content area is.
    pub fn sync_editor_viewport(&mut self) {
        let content = self.layout().editor_content;
        if let Ok(editor) = self.editor.ready_mut() {
            editor.set_viewport(content.width, content.height);
        }
    }

    pub(super) fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<&str> {
        self.toast
            .as_ref()
            .map(|toast| toast.message.as_str())
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            editor: EditorHandle::default(),
            toolbar: ToolbarState::Hidden,
            rate: Rate::default(),
            rate_dragging: false,
            comment: None,
            notice: None,
            header: HeaderControls::default(),
            user: DEFAULT_USER.to_string(),
            frame_size: (80, 24),
            help_visible: false,
            config_global_path: None,
            config_local_path: None,
            toast: None,
            should_quit: false,
        }
    }
}
