//! Transient notifications shown in the status area.

use std::collections::VecDeque;

const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub remaining: u32,
}

/// Bounded FIFO; the oldest toast is dropped when full.
#[derive(Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    ttl: u32,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(60)
    }
}

impl ToastQueue {
    pub fn new(ttl: u32) -> Self {
        Self {
            toasts: VecDeque::with_capacity(MAX_TOASTS),
            ttl: ttl.max(1),
        }
    }

    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) {
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            level,
            message: message.into(),
            remaining: self.ttl,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message);
    }

    /// Age every toast by one tick and drop the expired ones.
    pub fn tick(&mut self) {
        for toast in self.toasts.iter_mut() {
            toast.remaining = toast.remaining.saturating_sub(1);
        }
        self.toasts.retain(|t| t.remaining > 0);
    }

    /// Drop the oldest toast.
    pub fn dismiss(&mut self) {
        self.toasts.pop_front();
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
