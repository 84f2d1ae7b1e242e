//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`layout`]: Screen regions shared by rendering and mouse hit-testing
//! - rendering of the header, editor, transport row, footer, floating
//!   toolbar and modal overlays

pub mod layout;

mod header;
mod overlays;
mod render;
mod status;

use ratatui::style::Color;

pub use layout::{AppLayout, ToolbarLayout, app_layout, rate_at_column, toolbar_layout};
pub use overlays::comment_prompt_rect;
pub use render::{render, segment_style};

/// Page background (`#222`).
pub const PAGE_BG: (u8, u8, u8) = (0x22, 0x22, 0x22);
/// Editor background (`#333`); text backgrounds are blended over it.
pub const EDITOR_BG: (u8, u8, u8) = (0x33, 0x33, 0x33);
/// Floating toolbar background (`#555`).
pub const TOOLBAR_BG: (u8, u8, u8) = (0x55, 0x55, 0x55);
pub const SELECTION_BG: Color = Color::Rgb(0x26, 0x4f, 0x78);
pub const TEXT_FG: Color = Color::White;

pub const fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests;
