//! Per-hook loading flags and liveness tickets.
//!
//! Each mutating action is identified by a [`HookKey`]: what it does and,
//! when it acts on one record, that record's id. While a key is in flight
//! its control is disabled and a second [`HookRegistry::begin`] for the
//! same key is refused. Different keys never block each other.
//!
//! Completions carry the [`Ticket`] issued at `begin`. A ticket that no
//! longer matches (the key was abandoned, or restarted) is stale and its
//! result is dropped.

use std::collections::HashMap;

use crate::message::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    CreateSection,
    UpdateSection,
    ReorderSections,
    DeleteSection,
    AddItem,
    UpdateItem,
    DeleteItem,
    ReorderItems,
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
    CreateArticle,
    UpdateArticle,
    DeleteArticle,
    CreateAd,
    UpdateAd,
    ToggleAd,
    DeleteAd,
    Export,
    ChangePassword,
}

impl HookKind {
    /// Caches to refetch after this hook succeeds.
    pub fn refetch(&self) -> Vec<Resource> {
        use HookKind::*;
        match self {
            CreateSection | UpdateSection | ReorderSections | DeleteSection | AddItem
            | UpdateItem | DeleteItem | ReorderItems => vec![Resource::Sections],
            CreateCategory | UpdateCategory | DeleteCategory => vec![Resource::Categories],
            CreateArticle | UpdateArticle | DeleteArticle => {
                vec![Resource::Articles { page: 1 }]
            }
            CreateAd | UpdateAd | ToggleAd | DeleteAd => vec![Resource::Ads],
            Export | ChangePassword => Vec::new(),
        }
    }
}

/// One hook instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookKey {
    pub kind: HookKind,
    pub target: Option<i64>,
}

impl HookKey {
    pub fn new(kind: HookKind) -> Self {
        Self { kind, target: None }
    }

    pub fn on(kind: HookKind, target: i64) -> Self {
        Self {
            kind,
            target: Some(target),
        }
    }
}

/// Proof that a request was started; returned with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub key: HookKey,
    seq: u64,
}

#[derive(Debug, Default)]
pub struct HookRegistry {
    in_flight: HashMap<HookKey, u64>,
    next_seq: u64,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as loading. `None` if it already is.
    pub fn begin(&mut self, key: HookKey) -> Option<Ticket> {
        if self.in_flight.contains_key(&key) {
            tracing::debug!("Hook {:?} already in flight", key);
            return None;
        }
        self.next_seq += 1;
        self.in_flight.insert(key, self.next_seq);
        Some(Ticket {
            key,
            seq: self.next_seq,
        })
    }

    /// Clear the loading flag for `ticket`.
    ///
    /// Returns `false` when the ticket is stale; the caller must then ignore
    /// the result it carries.
    pub fn complete(&mut self, ticket: &Ticket) -> bool {
        match self.in_flight.get(&ticket.key) {
            Some(seq) if *seq == ticket.seq => {
                self.in_flight.remove(&ticket.key);
                true
            }
            _ => {
                tracing::debug!("Ignoring stale result for {:?}", ticket.key);
                false
            }
        }
    }

    /// Stop caring about `key`. Its pending result becomes stale.
    pub fn abandon(&mut self, key: &HookKey) {
        self.in_flight.remove(key);
    }

    pub fn is_loading(&self, key: &HookKey) -> bool {
        self.in_flight.contains_key(key)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_is_serialized() {
        let mut hooks = HookRegistry::new();
        let key = HookKey::on(HookKind::DeleteItem, 4);
        let ticket = hooks.begin(key).unwrap();
        assert!(hooks.begin(key).is_none());
        assert!(hooks.is_loading(&key));

        assert!(hooks.complete(&ticket));
        assert!(!hooks.is_loading(&key));
        assert!(hooks.begin(key).is_some());
    }

    #[test]
    fn test_independent_hooks_do_not_block() {
        let mut hooks = HookRegistry::new();
        let delete_ad = hooks.begin(HookKey::on(HookKind::DeleteAd, 7)).unwrap();
        let create_category = hooks.begin(HookKey::new(HookKind::CreateCategory)).unwrap();
        assert!(hooks.begin(HookKey::on(HookKind::DeleteAd, 8)).is_some());
        assert_eq!(hooks.in_flight_count(), 3);

        assert!(hooks.complete(&create_category));
        assert!(hooks.is_loading(&delete_ad.key));
    }

    #[test]
    fn test_abandoned_ticket_is_stale() {
        let mut hooks = HookRegistry::new();
        let key = HookKey::on(HookKind::UpdateItem, 2);
        let first = hooks.begin(key).unwrap();
        hooks.abandon(&key);
        let second = hooks.begin(key).unwrap();

        assert!(!hooks.complete(&first));
        assert!(hooks.is_loading(&key));
        assert!(hooks.complete(&second));
    }

    #[test]
    fn test_double_complete_is_ignored() {
        let mut hooks = HookRegistry::new();
        let ticket = hooks.begin(HookKey::new(HookKind::Export)).unwrap();
        assert!(hooks.complete(&ticket));
        assert!(!hooks.complete(&ticket));
    }

    #[test]
    fn test_refetch_targets() {
        assert_eq!(HookKind::ReorderItems.refetch(), vec![Resource::Sections]);
        assert_eq!(HookKind::ToggleAd.refetch(), vec![Resource::Ads]);
        assert!(HookKind::Export.refetch().is_empty());
    }
}
