//! Single-record detail screen state

use pokedex_api::{Catalog, CatalogError};
use pokedex_core::{DetailRecord, FALLBACK_DETAIL_IMAGE};

pub const NOT_FOUND_MESSAGE: &str = "Pokémon not found";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load the Pokémon";

/// A single record as the detail screen shows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub record: DetailRecord,
    /// Official artwork, or the placeholder when the catalog has none
    pub image_url: String,
}

impl DetailView {
    pub fn new(record: DetailRecord) -> Self {
        let image_url = record
            .sprites
            .official_artwork
            .clone()
            .unwrap_or_else(|| FALLBACK_DETAIL_IMAGE.to_string());
        Self { record, image_url }
    }

    /// Fetch the record with the given id or name
    pub async fn load(catalog: &Catalog, id_or_name: &str) -> Result<Self, CatalogError> {
        catalog.get_detail(id_or_name).await.map(Self::new)
    }

    /// User-facing text for a failed load
    pub fn error_message(err: &CatalogError) -> &'static str {
        if err.is_not_found() {
            NOT_FOUND_MESSAGE
        } else {
            LOAD_FAILED_MESSAGE
        }
    }

    pub fn cry_url(&self) -> Option<&str> {
        self.record.cry_url()
    }
}
