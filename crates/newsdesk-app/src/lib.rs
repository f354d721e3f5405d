//! newsdesk-app - Application state and orchestration for Newsdesk
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state management,
//! edit-mode bindings and the shared edit modal, action hooks with liveness
//! tickets, forms, audio playback state and configuration loading.

pub mod actions;
pub mod audio;
pub mod bindings;
pub mod config;
pub mod confirm_dialog;
pub mod edit_modal;
pub mod forms;
pub mod handler;
pub mod hooks;
pub mod input_key;
pub mod intents;
pub mod message;
pub mod signals;
pub mod state;
pub mod toast;

// Re-export primary types
pub use actions::{handle_action, Mutation};
pub use handler::{handle_key, initial_action, update, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::{Message, Resource};
pub use state::{AppState, UiMode};
