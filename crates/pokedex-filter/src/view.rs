//! List view state shown to the user

use pokedex_core::{DetailRecord, Pagination, FALLBACK_LIST_IMAGE};

use crate::engine::Combination;

/// A record on screen plus which side of its sprite is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub record: DetailRecord,
    pub show_back: bool,
}

impl DisplayRecord {
    /// Sprite for the current side, falling back to the front and then the placeholder
    pub fn sprite_url(&self) -> &str {
        let sprites = &self.record.sprites;
        let back = if self.show_back { sprites.back_default.as_deref() } else { None };
        back.or(sprites.front_default.as_deref())
            .unwrap_or(FALLBACK_LIST_IMAGE)
    }
}

/// Everything the list screen renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub records: Vec<DisplayRecord>,
    pub pagination: Pagination,
    pub total_pages: u32,
    pub is_loading: bool,
    /// True while filtered results (not the browse page) are displayed
    pub is_searching: bool,
    pub error_message: Option<String>,
    /// Pass that produced the displayed records
    pub generation: u64,
}

impl ListView {
    pub fn new(page_size: u32) -> Self {
        Self {
            records: Vec::new(),
            pagination: Pagination::new(1, page_size, 0),
            total_pages: 0,
            is_loading: true,
            is_searching: false,
            error_message: None,
            generation: 0,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.pagination.current_page
    }

    pub fn total_count(&self) -> u64 {
        self.pagination.total_count
    }

    /// Replace the displayed records with the outcome of a pass
    pub fn show(&mut self, generation: u64, page: u32, combination: Combination) {
        let page_size = self.pagination.page_size;
        match combination {
            Combination::Page(catalog_page) => {
                self.pagination = Pagination::new(page, page_size, catalog_page.total_count);
                self.total_pages = self.pagination.total_pages();
                self.records = seed(catalog_page.records);
                self.is_searching = false;
            }
            Combination::Filtered(records) => {
                self.pagination = Pagination::new(1, page_size, records.len() as u64);
                self.total_pages = 1;
                self.records = seed(records);
                self.is_searching = true;
            }
        }
        self.generation = generation;
        self.is_loading = false;
        self.error_message = None;
    }

    /// Keep the records already on screen and surface the failure
    pub fn fail(&mut self, message: impl Into<String>) {
        self.is_loading = false;
        self.error_message = Some(message.into());
    }

    /// Flip every record that has a back sprite
    pub fn toggle_sprites(&mut self) {
        for display in self.records.iter_mut().filter(|d| d.record.has_back_sprite()) {
            display.show_back = !display.show_back;
        }
    }
}

/// Alternate the starting side so neighbouring cards differ
fn seed(records: Vec<DetailRecord>) -> Vec<DisplayRecord> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| DisplayRecord {
            record,
            show_back: index % 2 != 0,
        })
        .collect()
}
