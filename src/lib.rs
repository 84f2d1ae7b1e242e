// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorHandle)
    clippy::module_name_repetitions
)]

//! # Marginalia
//!
//! A terminal rich-text editor with a selection-driven formatting toolbar.
//!
//! Marginalia provides:
//! - An embedded rich-text engine with bold and background formatting
//! - Undo/redo history with edit coalescing
//! - A floating toolbar shown below any non-empty selection, offering bold,
//!   a rate-scaled highlight and comment annotations
//! - A header with the user's name and pitch/volume/rate controls
//!
//! ## Architecture
//!
//! Marginalia uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: Editor capability and the rich-text engine
//! - [`toolbar`]: Selection watcher, toolbar positioning and format actions
//! - [`header`]: Header controls
//! - [`ui`]: Terminal UI components
//! - [`config`]: Persisted command-line defaults
//! - [`perf`]: Debug event log and timing scopes

pub mod app;
pub mod config;
pub mod editor;
pub mod header;
pub mod perf;
pub mod toolbar;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{EditorCapability, EditorHandle, RichTextEditor};
    pub use crate::toolbar::{Rate, ToolbarState};
}
