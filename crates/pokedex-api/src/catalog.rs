//! Session-scoped memoization over a catalog source
//!
//! The name index, category name lists, category member lists and the damage
//! table are fetched at most once per session. Each cell is written once,
//! whole-value, and is shared read-only afterwards. A failed fetch leaves the
//! cell empty so the next caller tries again.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use pokedex_core::{BasicInfo, CatalogPage, CategoryKind, DamageTable, DetailRecord};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::CatalogError;
use crate::source::CatalogSource;

type Cell<T> = Arc<OnceCell<Arc<T>>>;

/// Catalog access with per-session caching of the read-only tables
pub struct Catalog {
    source: Arc<dyn CatalogSource>,
    basic_info: OnceCell<Arc<Vec<BasicInfo>>>,
    damage_table: OnceCell<Arc<DamageTable>>,
    category_names: Mutex<HashMap<CategoryKind, Cell<Vec<String>>>>,
    members: Mutex<HashMap<(CategoryKind, String), Cell<Vec<DetailRecord>>>>,
}

impl Catalog {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            basic_info: OnceCell::new(),
            damage_table: OnceCell::new(),
            category_names: Mutex::new(HashMap::new()),
            members: Mutex::new(HashMap::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        self.source.base_url()
    }

    /// One page of the default ordering. Never cached.
    pub async fn list_page(&self, limit: u32, offset: u32) -> Result<CatalogPage, CatalogError> {
        self.source.list_page(limit, offset).await
    }

    /// One record by id or name. Never cached.
    pub async fn get_detail(&self, id_or_name: &str) -> Result<DetailRecord, CatalogError> {
        self.source.get_detail(id_or_name).await
    }

    /// The complete name index
    pub async fn all_basic_info(&self) -> Result<Arc<Vec<BasicInfo>>, CatalogError> {
        let source = &self.source;
        let index = self
            .basic_info
            .get_or_try_init(|| async move {
                debug!("Loading name index");
                source.list_all_basic_info().await.map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(index))
    }

    /// Names of every category of one kind
    pub async fn category_names(&self, kind: CategoryKind) -> Result<Arc<Vec<String>>, CatalogError> {
        let cell = Arc::clone(self.category_names.lock().entry(kind).or_default());
        let source = &self.source;
        let names = cell
            .get_or_try_init(|| async move {
                debug!("Loading {} names", kind);
                source.list_category_names(kind).await.map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(names))
    }

    /// Every record of a named category, resolved to full detail
    pub async fn members(
        &self,
        kind: CategoryKind,
        name: &str,
    ) -> Result<Arc<Vec<DetailRecord>>, CatalogError> {
        let cell = Arc::clone(
            self.members
                .lock()
                .entry((kind, name.to_string()))
                .or_default(),
        );
        let source = &self.source;
        let members = cell
            .get_or_try_init(|| async move {
                debug!("Loading members of {} {}", kind, name);
                source.list_members(kind, name).await.map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(members))
    }

    /// Damage relations of every type
    pub async fn damage_table(&self) -> Result<Arc<DamageTable>, CatalogError> {
        let source = &self.source;
        let table = self
            .damage_table
            .get_or_try_init(|| async move {
                debug!("Loading damage relations");
                source.list_damage_relations().await.map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(table))
    }
}
