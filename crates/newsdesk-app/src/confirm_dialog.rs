//! Confirm dialog state.
//!
//! Every delete goes through here before a request is made. The rendering
//! widget lives in the TUI crate.

use crate::message::{DeleteTarget, Message};

#[derive(Debug, Clone)]
pub struct ConfirmDialogState {
    pub title: String,
    pub message: String,
    pub target: DeleteTarget,
    pub options: Vec<(String, Message)>,
    pub selected: usize,
}

impl ConfirmDialogState {
    /// Delete confirmation for `target`, described as `what`.
    pub fn delete(target: DeleteTarget, what: impl Into<String>) -> Self {
        let what = what.into();
        Self {
            title: format!("Delete {}?", kind_label(&target)),
            message: format!("\"{what}\" will be removed. This cannot be undone."),
            target,
            options: vec![
                ("Delete".to_string(), Message::ConfirmAccept),
                ("Cancel".to_string(), Message::ConfirmCancel),
            ],
            // Cancel is preselected
            selected: 1,
        }
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    /// Message for the highlighted option
    pub fn chosen(&self) -> Option<Message> {
        self.options.get(self.selected).map(|(_, m)| m.clone())
    }
}

fn kind_label(target: &DeleteTarget) -> &'static str {
    match target {
        DeleteTarget::Section(_) => "section",
        DeleteTarget::Item { .. } => "item",
        DeleteTarget::Category(_) => "category",
        DeleteTarget::Article(_) => "article",
        DeleteTarget::Ad(_) => "advertisement",
    }
}
