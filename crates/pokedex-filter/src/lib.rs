//! Pokedex Filter - Combines filter criteria into catalog results
//!
//! - `engine`: one combination pass from criteria to records
//! - `state` / `debounce`: the observable filter store and its text input
//! - `controller`: latest-wins passes committed into the list view
//! - `sprite` / `detail`: view-side helpers for the list and detail screens

pub mod config;
pub mod controller;
pub mod debounce;
pub mod detail;
pub mod engine;
pub mod sprite;
pub mod state;
pub mod view;
pub mod weakness;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ListConfig;
pub use controller::{ListController, PassHandle};
pub use debounce::SearchDebouncer;
pub use detail::DetailView;
pub use engine::{Combination, FilterEngine, FilterOptions};
pub use sprite::SpriteToggle;
pub use state::FilterStore;
pub use view::{DisplayRecord, ListView};
