//! Message processing
//!
//! Runs a message through the TEA update function, hands any resulting
//! action to a background task and keeps going while follow-up messages
//! are produced.

use std::sync::Arc;

use tokio::sync::mpsc;

use newsdesk_api::Backend;
use newsdesk_app::{handle_action, update, AppState, Message};

/// Process a message through the TEA update function
pub fn process_message<B>(
    state: &mut AppState,
    message: Message,
    backend: &Arc<B>,
    msg_tx: &mpsc::Sender<Message>,
) where
    B: Backend + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = update(state, m);

        if let Some(action) = result.action {
            handle_action(action, Arc::clone(backend), msg_tx.clone());
        }

        msg = result.message;
    }
}
