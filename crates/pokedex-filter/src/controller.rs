//! List controller: runs combination passes and commits them to the view
//!
//! Every pass takes a generation number when it starts. A pass commits only if
//! its generation is still the latest, so a slow, superseded pass can never
//! overwrite a view that already reflects newer criteria. Superseded passes are
//! also aborted so their remaining requests are dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use pokedex_api::CatalogError;
use pokedex_core::FilterCriteria;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use crate::config::ListConfig;
use crate::engine::{Combination, FilterEngine};
use crate::sprite::SpriteToggle;
use crate::state::FilterStore;
use crate::view::ListView;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load the Pokémon list";
pub const FILTER_FAILED_MESSAGE: &str = "An unexpected error occurred while applying the filters";

/// A started combination pass
pub struct PassHandle {
    generation: u64,
    handle: JoinHandle<()>,
}

impl PassHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait for the pass to end. Returns false if it was aborted by a newer pass.
    pub async fn finished(self) -> bool {
        self.handle.await.is_ok()
    }
}

struct Inner {
    engine: FilterEngine,
    view: Arc<Mutex<ListView>>,
    generation: AtomicU64,
    sprite: Mutex<SpriteToggle>,
    sprite_period: Duration,
    pass: Mutex<Option<AbortHandle>>,
    follower: Mutex<Option<AbortHandle>>,
    commits: watch::Sender<u64>,
}

impl Inner {
    fn commit(
        &self,
        generation: u64,
        criteria: &FilterCriteria,
        page: u32,
        result: Result<Combination, CatalogError>,
    ) {
        let mut view = self.view.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding superseded pass {}", generation);
            return;
        }

        match result {
            Ok(combination) => {
                let browsing = matches!(combination, Combination::Page(_));
                info!(
                    "Pass {} shows {} records{}",
                    generation,
                    combination.records().len(),
                    if browsing { format!(" (page {})", page) } else { String::new() }
                );
                view.show(generation, page, combination);
                if browsing {
                    self.sprite.lock().start(Arc::clone(&self.view), self.sprite_period);
                }
            }
            Err(err) => {
                warn!("Pass {} failed: {}", generation, err);
                view.fail(if criteria.is_empty() {
                    LOAD_FAILED_MESSAGE
                } else {
                    FILTER_FAILED_MESSAGE
                });
            }
        }
        drop(view);
        self.commits.send_replace(generation);
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(pass) = self.pass.get_mut().take() {
            pass.abort();
        }
        if let Some(follower) = self.follower.get_mut().take() {
            follower.abort();
        }
    }
}

/// Drives the list view from filter criteria. Clones share one controller.
#[derive(Clone)]
pub struct ListController {
    inner: Arc<Inner>,
}

impl ListController {
    pub fn new(engine: FilterEngine, config: &ListConfig) -> Self {
        let view = ListView::new(engine.page_size());
        let (commits, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                engine,
                view: Arc::new(Mutex::new(view)),
                generation: AtomicU64::new(0),
                sprite: Mutex::new(SpriteToggle::new()),
                sprite_period: config.sprite_period(),
                pass: Mutex::new(None),
                follower: Mutex::new(None),
                commits,
            }),
        }
    }

    pub fn engine(&self) -> &FilterEngine {
        &self.inner.engine
    }

    /// Copy of the current view
    pub fn snapshot(&self) -> ListView {
        self.inner.view.lock().clone()
    }

    /// Receiver notified with the generation of every committed pass
    pub fn commits(&self) -> watch::Receiver<u64> {
        self.inner.commits.subscribe()
    }

    pub fn is_toggling_sprites(&self) -> bool {
        self.inner.sprite.lock().is_running()
    }

    /// Start a pass for `criteria`, superseding any pass in flight.
    /// Empty criteria show the first browse page.
    pub fn apply(&self, criteria: FilterCriteria) -> PassHandle {
        self.start(criteria, 1)
    }

    /// Browse to `page`. Ignored while filtered results are shown or when the
    /// page is out of range or already displayed.
    pub fn go_to_page(&self, page: u32) -> Option<PassHandle> {
        {
            let view = self.inner.view.lock();
            if view.is_searching || !view.pagination.can_go_to(page) {
                return None;
            }
        }
        Some(self.start(FilterCriteria::default(), page))
    }

    pub fn next_page(&self) -> Option<PassHandle> {
        let current = self.inner.view.lock().current_page();
        self.go_to_page(current + 1)
    }

    pub fn previous_page(&self) -> Option<PassHandle> {
        let current = self.inner.view.lock().current_page();
        self.go_to_page(current.saturating_sub(1))
    }

    fn start(&self, criteria: FilterCriteria, page: u32) -> PassHandle {
        // Generation bump, view reset and task swap happen under the view lock
        // so commits observe them atomically.
        let mut view = self.inner.view.lock();
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        view.is_loading = true;
        view.error_message = None;
        self.inner.sprite.lock().stop();

        debug!("Starting pass {} for {:?}", generation, criteria);
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            let result = inner.engine.combine(&criteria, page).await;
            inner.commit(generation, &criteria, page, result);
        });
        if let Some(previous) = self.inner.pass.lock().replace(handle.abort_handle()) {
            previous.abort();
        }
        drop(view);

        PassHandle { generation, handle }
    }

    /// Run a pass for every snapshot the store publishes, starting with the current one
    pub fn follow(&self, store: &FilterStore) -> JoinHandle<()> {
        let mut rx = store.subscribe();
        let controller = self.clone();
        let handle = tokio::spawn(async move {
            let initial = rx.borrow_and_update().clone();
            controller.apply(initial);
            while rx.changed().await.is_ok() {
                let criteria = rx.borrow_and_update().clone();
                controller.apply(criteria);
            }
        });
        if let Some(previous) = self.inner.follower.lock().replace(handle.abort_handle()) {
            previous.abort();
        }
        handle
    }

    /// Tear the view down: stop following, drop the pass in flight, stop the sprite toggle
    pub fn shutdown(&self) {
        if let Some(follower) = self.inner.follower.lock().take() {
            follower.abort();
        }
        {
            let mut view = self.inner.view.lock();
            self.inner.generation.fetch_add(1, Ordering::SeqCst);
            view.is_loading = false;
            if let Some(pass) = self.inner.pass.lock().take() {
                pass.abort();
            }
        }
        self.inner.sprite.lock().stop();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use pokedex_core::{CategoryKind, DetailRecord};
    use tokio::sync::mpsc;
    use tokio::time::sleep;

    use super::*;
    use crate::debounce::SearchDebouncer;
    use crate::testing::{catalog, record, FakeCatalog};

    fn controller(fake: &Arc<FakeCatalog>) -> ListController {
        let engine = FilterEngine::new(catalog(fake), 4);
        ListController::new(engine, &ListConfig::default())
    }

    fn names(view: &ListView) -> Vec<String> {
        view.records.iter().map(|d| d.record.name.clone()).collect()
    }

    async fn settle() {
        sleep(Duration::from_millis(10)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_browse_page_starts_sprite_toggle() {
        let fake = Arc::new(FakeCatalog::new());
        let controller = controller(&fake);
        assert!(controller.snapshot().is_loading);

        assert!(controller.apply(FilterCriteria::default()).finished().await);
        let view = controller.snapshot();
        assert_eq!(names(&view), vec!["bulbasaur", "charmander", "charmeleon", "charizard"]);
        assert_eq!(view.total_count(), 9);
        assert_eq!(view.total_pages, 3);
        assert!(!view.is_loading);
        assert!(!view.is_searching);
        assert!(controller.is_toggling_sprites());
    }

    #[tokio::test(start_paused = true)]
    async fn test_filtered_results_stop_sprite_toggle() {
        let fake = Arc::new(FakeCatalog::new());
        let controller = controller(&fake);
        controller.apply(FilterCriteria::default()).finished().await;

        let criteria = FilterCriteria::default().with_category(CategoryKind::Type, ["water"]);
        controller.apply(criteria).finished().await;
        let view = controller.snapshot();
        assert_eq!(names(&view), vec!["squirtle", "totodile"]);
        assert!(view.is_searching);
        assert_eq!(view.total_pages, 1);
        assert!(!controller.is_toggling_sprites());

        let before = controller.snapshot();
        sleep(Duration::from_secs(10)).await;
        assert_eq!(controller.snapshot(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_pass_wins() {
        let fake = Arc::new(FakeCatalog::new());
        fake.delay_detail("4", Duration::from_secs(5));
        let controller = controller(&fake);

        let slow = controller.apply(FilterCriteria::search("char"));
        let slow_generation = slow.generation();
        // let the slow pass get stuck resolving charmander
        sleep(Duration::from_secs(1)).await;

        let fast = controller.apply(FilterCriteria::search("pika"));
        assert!(fast.generation() > slow_generation);
        assert!(fast.finished().await);
        assert!(!slow.finished().await);

        sleep(Duration::from_secs(10)).await;
        let view = controller.snapshot();
        assert_eq!(names(&view), vec!["pikachu"]);
        assert_eq!(view.generation, slow_generation + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_commit_is_discarded() {
        let fake = Arc::new(FakeCatalog::new());
        let controller = controller(&fake);

        let first = controller.apply(FilterCriteria::search("saur"));
        let stale_generation = first.generation();
        controller.apply(FilterCriteria::search("pika")).finished().await;

        let stale: Vec<DetailRecord> = vec![record(4, "charmander", &["fire"])];
        controller.inner.commit(
            stale_generation,
            &FilterCriteria::search("saur"),
            1,
            Ok(Combination::Filtered(stale)),
        );
        assert_eq!(names(&controller.snapshot()), vec!["pikachu"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_displayed_records() {
        let fake = Arc::new(FakeCatalog::new());
        fake.fail_category("fire");
        let controller = controller(&fake);
        controller.apply(FilterCriteria::default()).finished().await;

        let criteria = FilterCriteria::default().with_category(CategoryKind::Type, ["fire"]);
        controller.apply(criteria).finished().await;
        let view = controller.snapshot();
        assert_eq!(view.records.len(), 4);
        assert_eq!(view.error_message.as_deref(), Some(FILTER_FAILED_MESSAGE));
        assert!(!view.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_returns_to_first_page() {
        let fake = Arc::new(FakeCatalog::new());
        let controller = controller(&fake);

        controller.apply(FilterCriteria::default()).finished().await;
        let initial = controller.snapshot();

        controller.go_to_page(2).unwrap().finished().await;
        controller
            .apply(FilterCriteria::search("a").with_weaknesses(["water"]))
            .finished()
            .await;
        assert!(controller.snapshot().is_searching);

        controller.apply(FilterCriteria::default()).finished().await;
        let reset = controller.snapshot();
        assert_eq!(reset.records, initial.records);
        assert_eq!(reset.total_count(), initial.total_count());
        assert_eq!(reset.current_page(), 1);
        assert!(!reset.is_searching);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_navigation() {
        let fake = Arc::new(FakeCatalog::new());
        let controller = controller(&fake);
        controller.apply(FilterCriteria::default()).finished().await;

        assert!(controller.go_to_page(1).is_none());
        assert!(controller.go_to_page(4).is_none());
        assert!(controller.previous_page().is_none());

        controller.go_to_page(3).unwrap().finished().await;
        let view = controller.snapshot();
        assert_eq!(view.current_page(), 3);
        assert_eq!(names(&view), vec!["totodile"]);
        assert!(controller.next_page().is_none());

        controller.previous_page().unwrap().finished().await;
        assert_eq!(controller.snapshot().current_page(), 2);

        controller.apply(FilterCriteria::search("char")).finished().await;
        assert!(controller.next_page().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_follows_store_through_debouncer() {
        let fake = Arc::new(FakeCatalog::new());
        let controller = controller(&fake);
        let store = FilterStore::new();
        controller.follow(&store);

        let (tx, rx) = mpsc::channel(16);
        let debouncer = SearchDebouncer::default().spawn(rx, store.clone());
        for term in ["c", "ch", "char"] {
            tx.send(term.to_string()).await.unwrap();
        }
        sleep(Duration::from_secs(1)).await;

        let view = controller.snapshot();
        assert_eq!(names(&view), vec!["charmander", "charmeleon", "charizard"]);
        // one pass for the initial snapshot, one for the debounced term
        assert_eq!(view.generation, 2);
        assert_eq!(fake.page_calls.load(Ordering::SeqCst), 1);

        store.reset();
        settle().await;
        assert_eq!(controller.snapshot().current_page(), 1);
        assert!(!controller.snapshot().is_searching);

        drop(tx);
        assert_eq!(debouncer.await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_discards_pass_in_flight() {
        let fake = Arc::new(FakeCatalog::new());
        let controller = controller(&fake);
        controller.apply(FilterCriteria::default()).finished().await;
        assert!(controller.is_toggling_sprites());

        fake.delay_pages(Duration::from_secs(5));
        let pending = controller.go_to_page(2).unwrap();
        settle().await;
        controller.shutdown();

        assert!(!pending.finished().await);
        assert!(!controller.is_toggling_sprites());
        sleep(Duration::from_secs(10)).await;
        assert_eq!(controller.snapshot().current_page(), 1);
    }
}
