use async_trait::async_trait;
use pokedex_core::{BasicInfo, CatalogPage, CategoryKind, DamageTable, DetailRecord};

use crate::error::CatalogError;
use crate::fanout::fan_out;

/// Read-only access to the creature catalog.
///
/// Every operation issues one or more requests and never retries. Fan-out
/// operations are all-or-nothing: if any member request fails, the whole
/// operation fails.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// API root used to build resource URLs for projected records
    fn base_url(&self) -> &str;

    /// One page of the default ordering, each entry resolved to full detail
    async fn list_page(&self, limit: u32, offset: u32) -> Result<CatalogPage, CatalogError>;

    /// One record by numeric id or exact name
    async fn get_detail(&self, id_or_name: &str) -> Result<DetailRecord, CatalogError>;

    /// The complete name index
    async fn list_all_basic_info(&self) -> Result<Vec<BasicInfo>, CatalogError>;

    /// Names of every category of one kind
    async fn list_category_names(&self, kind: CategoryKind) -> Result<Vec<String>, CatalogError>;

    /// References to every record belonging to a named category
    async fn list_member_refs(
        &self,
        kind: CategoryKind,
        name: &str,
    ) -> Result<Vec<BasicInfo>, CatalogError>;

    /// Every record of a named category, resolved to full detail
    async fn list_members(
        &self,
        kind: CategoryKind,
        name: &str,
    ) -> Result<Vec<DetailRecord>, CatalogError> {
        let refs = self.list_member_refs(kind, name).await?;
        let keys: Vec<String> = refs.iter().map(BasicInfo::lookup_key).collect();
        fan_out(keys.iter().map(|key| self.get_detail(key))).await
    }

    /// Damage relations of every type
    async fn list_damage_relations(&self) -> Result<DamageTable, CatalogError>;
}
