//! newsdesk-tui - Terminal UI for Newsdesk
//!
//! This crate provides the ratatui-based terminal interface. It drives the
//! TEA loop from newsdesk-app and adds terminal rendering, event polling,
//! the section renderers and the modal overlays.

pub mod event;
pub mod layout;
pub mod process;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry points
pub use runner::run;
