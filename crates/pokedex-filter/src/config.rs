//! Paging and timing settings for the list view

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// List view timing and paging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Records per browse page
    pub page_size: u32,
    /// Interval between front/back sprite flips, in milliseconds
    pub sprite_toggle_ms: u64,
    /// Quiet period before a search edit is applied, in milliseconds
    pub debounce_ms: u64,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            sprite_toggle_ms: 3000,
            debounce_ms: 300,
        }
    }
}

impl ListConfig {
    /// Replace values the list cannot run with (zero page size or periods) by the smallest usable ones
    pub fn validated(mut self) -> Self {
        if self.page_size == 0 {
            warn!("page_size must be at least 1, using 1");
            self.page_size = 1;
        }
        if self.sprite_toggle_ms == 0 {
            warn!("sprite_toggle_ms must be at least 1, using 1");
            self.sprite_toggle_ms = 1;
        }
        if self.debounce_ms == 0 {
            warn!("debounce_ms must be at least 1, using 1");
            self.debounce_ms = 1;
        }
        self
    }

    /// Never zero; tokio intervals reject a zero period
    pub fn sprite_period(&self) -> Duration {
        Duration::from_millis(self.sprite_toggle_ms.max(1))
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.max(1))
    }
}
