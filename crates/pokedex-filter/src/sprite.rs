//! Periodic front/back sprite flipping for the browse page

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::view::ListView;

/// Owns at most one running toggle task
#[derive(Default)]
pub struct SpriteToggle {
    task: Option<JoinHandle<()>>,
}

impl SpriteToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start flipping sprites every `period`, replacing any running toggle.
    ///
    /// Ticks are skipped while filtered results are displayed.
    pub fn start(&mut self, view: Arc<Mutex<ListView>>, period: Duration) {
        self.stop();
        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let mut guard = view.lock();
                if !guard.is_searching {
                    guard.toggle_sprites();
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for SpriteToggle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use pokedex_core::CatalogPage;
    use tokio::time::sleep;

    use super::*;
    use crate::config::ListConfig;
    use crate::engine::Combination;
    use crate::testing::record;

    fn browse_view() -> Arc<Mutex<ListView>> {
        let mut view = ListView::new(20);
        view.show(
            1,
            1,
            Combination::Page(CatalogPage {
                records: vec![record(1, "bulbasaur", &[]), record(7, "squirtle", &[])],
                total_count: 2,
            }),
        );
        Arc::new(Mutex::new(view))
    }

    fn sides(view: &Arc<Mutex<ListView>>) -> Vec<bool> {
        view.lock().records.iter().map(|d| d.show_back).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_flips_each_period() {
        let view = browse_view();
        let mut toggle = SpriteToggle::new();
        toggle.start(Arc::clone(&view), Duration::from_secs(3));
        assert!(toggle.is_running());

        sleep(Duration::from_millis(2900)).await;
        assert_eq!(sides(&view), vec![false, true]);
        sleep(Duration::from_millis(200)).await;
        assert_eq!(sides(&view), vec![true, false]);
        sleep(Duration::from_secs(3)).await;
        assert_eq!(sides(&view), vec![false, true]);

        toggle.stop();
        assert!(!toggle.is_running());
        sleep(Duration::from_secs(10)).await;
        assert_eq!(sides(&view), vec![false, true]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_setting_keeps_toggling() {
        let view = browse_view();
        let config = ListConfig {
            sprite_toggle_ms: 0,
            ..Default::default()
        };
        let mut toggle = SpriteToggle::new();
        toggle.start(Arc::clone(&view), config.sprite_period());

        sleep(Duration::from_millis(5)).await;
        assert!(toggle.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_while_searching() {
        let view = browse_view();
        view.lock().is_searching = true;
        let mut toggle = SpriteToggle::new();
        toggle.start(Arc::clone(&view), Duration::from_secs(3));

        sleep(Duration::from_secs(10)).await;
        assert_eq!(sides(&view), vec![false, true]);
    }
}
