//! Centralized theme for the newsroom TUI.
//!
//! - `palette` holds raw color constants
//! - `styles` holds semantic style builder functions

pub mod palette;
pub mod styles;
