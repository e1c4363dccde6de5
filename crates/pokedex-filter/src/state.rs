//! Observable filter state
//!
//! The store holds the latest complete `FilterCriteria` snapshot. Every edit
//! publishes a whole new snapshot; subscribers never see a half-applied edit.

use std::sync::Arc;

use pokedex_core::FilterCriteria;
use tokio::sync::watch;
use tracing::debug;

/// Shared handle to the current filter criteria. Clones share one store.
#[derive(Clone)]
pub struct FilterStore {
    tx: Arc<watch::Sender<FilterCriteria>>,
}

impl FilterStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FilterCriteria::default());
        Self { tx: Arc::new(tx) }
    }

    /// Copy of the current snapshot
    pub fn current(&self) -> FilterCriteria {
        self.tx.borrow().clone()
    }

    /// Receiver that observes every published snapshot, starting from the current one
    pub fn subscribe(&self) -> watch::Receiver<FilterCriteria> {
        self.tx.subscribe()
    }

    /// Publish a new snapshot wholesale
    pub fn replace(&self, criteria: FilterCriteria) {
        debug!("Filter state replaced: {:?}", criteria);
        self.tx.send_replace(criteria);
    }

    /// Edit a copy of the current snapshot, then publish it
    pub fn update(&self, edit: impl FnOnce(&mut FilterCriteria)) {
        let mut next = self.current();
        edit(&mut next);
        self.replace(next);
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.update(|criteria| criteria.search_term = term);
    }

    /// Back to the empty criteria of the default browse view
    pub fn reset(&self) {
        self.replace(FilterCriteria::default());
    }
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}
