//! Debounced free-text input
//!
//! Bursts of edits collapse into the last value once the input has been quiet
//! for the window. A value equal to the last one forwarded is suppressed.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::debug;

use crate::state::FilterStore;

pub struct SearchDebouncer {
    window: Duration,
}

impl SearchDebouncer {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    /// Forward debounced edits into the store until the edit channel closes.
    ///
    /// A pending edit is flushed when the channel closes. Returns how many
    /// search terms were forwarded.
    pub async fn run(self, mut edits: mpsc::Receiver<String>, store: FilterStore) -> usize {
        let mut pending: Option<String> = None;
        let mut last_forwarded: Option<String> = None;
        let mut forwarded = 0;

        loop {
            let received = if pending.is_some() {
                match timeout(self.window, edits.recv()).await {
                    Ok(received) => received,
                    Err(_) => {
                        forwarded += forward(pending.take(), &mut last_forwarded, &store);
                        continue;
                    }
                }
            } else {
                edits.recv().await
            };

            match received {
                Some(term) => pending = Some(term),
                None => {
                    forwarded += forward(pending.take(), &mut last_forwarded, &store);
                    break;
                }
            }
        }

        forwarded
    }

    pub fn spawn(self, edits: mpsc::Receiver<String>, store: FilterStore) -> JoinHandle<usize> {
        tokio::spawn(self.run(edits, store))
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

fn forward(term: Option<String>, last: &mut Option<String>, store: &FilterStore) -> usize {
    let Some(term) = term else {
        return 0;
    };
    if last.as_deref() == Some(term.as_str()) {
        debug!("Search term unchanged, skipping");
        return 0;
    }
    store.set_search_term(term.clone());
    *last = Some(term);
    1
}
