//! Pokedex Core - Domain types shared by the catalog client and the filter engine
//!
//! This crate provides:
//! - Catalog records (basic references, resolved detail records, damage relations)
//! - Filter criteria as an immutable, wholesale-replaced snapshot
//! - Pagination math for the browse view

pub mod filter;
pub mod pagination;
pub mod types;

pub use filter::FilterCriteria;
pub use pagination::{PageLink, Pagination};
pub use types::{
    BasicInfo, CatalogPage, CategoryKind, Cries, DamageRelation, DamageTable, DetailRecord,
    Sprites, TypeSlot, UnknownCategory, FALLBACK_DETAIL_IMAGE, FALLBACK_LIST_IMAGE,
};
