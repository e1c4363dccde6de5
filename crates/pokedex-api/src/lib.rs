//! Pokedex API - Typed client for the public PokeAPI catalog
//!
//! Provides the `CatalogSource` seam, its HTTP implementation, and a
//! session-scoped memoizing `Catalog` over any source.

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod fanout;
pub mod source;
pub mod types;

pub use catalog::Catalog;
pub use client::PokeApiClient;
pub use config::ApiConfig;
pub use error::CatalogError;
pub use fanout::fan_out;
pub use source::CatalogSource;
