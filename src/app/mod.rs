//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{DEFAULT_USER, Model};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::editor::EditorOptions;
use crate::toolbar::Rate;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    user: String,
    rate: Rate,
    editor_options: EditorOptions,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application with default settings.
    pub fn new() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
            rate: Rate::default(),
            editor_options: EditorOptions::default(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Set the name shown in the header.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Set the initial rate slider value.
    pub const fn with_rate(mut self, rate: Rate) -> Self {
        self.rate = rate;
        self
    }

    /// Configure the embedded editor (history settings).
    pub const fn with_editor_options(mut self, options: EditorOptions) -> Self {
        self.editor_options = options;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
