//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `data`: Fetch results and mutation completions
//! - `editing`: Edit mode, bindings and the edit modal
//! - `page`: Browsing, section intents and audio
//! - `admin`: Admin panel, forms and delete confirmation

pub(crate) mod admin;
pub(crate) mod data;
pub(crate) mod editing;
pub(crate) mod keys;
pub(crate) mod page;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use newsdesk_api::ExportKind;

use crate::actions::Mutation;
use crate::hooks::Ticket;
use crate::message::{Message, Resource};

pub use keys::handle_key;
pub use update::{initial_action, update};

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Load (or reload) caches from the backend
    Fetch(Vec<Resource>),

    /// Run a create/update/delete under its hook ticket
    RunMutation { ticket: Ticket, mutation: Mutation },

    /// Download a CSV export into `dir`
    Export {
        ticket: Ticket,
        kind: ExportKind,
        default_name: String,
        dir: PathBuf,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    pub fn fetch(resources: Vec<Resource>) -> Self {
        if resources.is_empty() {
            Self::none()
        } else {
            Self::action(UpdateAction::Fetch(resources))
        }
    }
}
