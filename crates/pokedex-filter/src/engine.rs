//! Filter combination engine
//!
//! One combination pass turns a criteria snapshot into the records to show:
//! - no active criterion: the requested browse page
//! - numeric search term: a direct lookup by id, ignoring every other criterion
//! - otherwise: the name index narrowed by the term, then intersected with the
//!   union of each active category group (OR within a group, AND across groups),
//!   then with the weakness group, and finally resolved to detail records
//!
//! Detail resolution of the survivors tolerates per-record failures: a record
//! that cannot be fetched is logged and dropped. Every other failure aborts the pass.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use futures_util::future::join_all;
use pokedex_api::{fan_out, Catalog, CatalogError};
use pokedex_core::{BasicInfo, CatalogPage, CategoryKind, DetailRecord, FilterCriteria, Pagination};
use tracing::{debug, warn};

use crate::weakness;

/// Outcome of one combination pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Combination {
    /// Default browse mode
    Page(CatalogPage),
    /// Every record matching the active criteria
    Filtered(Vec<DetailRecord>),
}

impl Combination {
    pub fn records(&self) -> &[DetailRecord] {
        match self {
            Self::Page(page) => &page.records,
            Self::Filtered(records) => records,
        }
    }
}

/// Choices offered by the filter panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub types: Vec<String>,
    pub generations: Vec<String>,
    pub abilities: Vec<String>,
    /// Weaknesses are expressed as type names
    pub weaknesses: Vec<String>,
}

pub struct FilterEngine {
    catalog: Arc<Catalog>,
    page_size: u32,
}

impl FilterEngine {
    pub fn new(catalog: Arc<Catalog>, page_size: u32) -> Self {
        Self { catalog, page_size }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Run one combination pass. `page` only applies to browse mode.
    pub async fn combine(
        &self,
        criteria: &FilterCriteria,
        page: u32,
    ) -> Result<Combination, CatalogError> {
        if criteria.is_empty() {
            let pagination = Pagination::new(page, self.page_size, 0);
            debug!("Browsing page {}", pagination.current_page);
            let page = self.catalog.list_page(self.page_size, pagination.offset()).await?;
            return Ok(Combination::Page(page));
        }

        if let Some(id) = criteria.numeric_id() {
            debug!("Direct lookup of #{}", id);
            return match self.catalog.get_detail(&id.to_string()).await {
                Ok(record) => Ok(Combination::Filtered(vec![record])),
                Err(err) if err.is_not_found() => Ok(Combination::Filtered(Vec::new())),
                Err(err) => Err(err),
            };
        }

        let survivors = self.candidates(criteria).await?;
        debug!("{} candidates survived filtering", survivors.len());
        Ok(Combination::Filtered(self.resolve(&survivors).await))
    }

    /// References matching every active criterion, in name-index order.
    ///
    /// Once the candidate set is empty, remaining groups are not fetched.
    pub async fn candidates(&self, criteria: &FilterCriteria) -> Result<Vec<BasicInfo>, CatalogError> {
        let index = self.catalog.all_basic_info().await?;
        let mut candidates: Vec<BasicInfo> = match criteria.normalized_term() {
            Some(term) => index.iter().filter(|info| info.name.contains(&term)).cloned().collect(),
            None => index.as_ref().clone(),
        };

        for &kind in CategoryKind::all() {
            let selected = criteria.category(kind);
            if selected.is_empty() || candidates.is_empty() {
                continue;
            }
            let group = self.category_group(kind, selected.iter()).await?;
            intersect(&mut candidates, &group);
        }

        if !criteria.weaknesses.is_empty() && !candidates.is_empty() {
            let group = self.weakness_group(&criteria.weaknesses).await?;
            intersect(&mut candidates, &group);
        }

        Ok(candidates)
    }

    /// Union of the members of every named category of one kind
    async fn category_group<'a, I>(&self, kind: CategoryKind, names: I) -> Result<Vec<BasicInfo>, CatalogError>
    where
        I: Iterator<Item = &'a String>,
    {
        let lists = fan_out(names.map(|name| self.catalog.members(kind, name))).await?;
        let base_url = self.catalog.base_url();

        let mut seen = HashSet::new();
        Ok(lists
            .iter()
            .flat_map(|members| members.iter())
            .filter(|record| seen.insert(record.name.clone()))
            .map(|record| record.basic_info(base_url))
            .collect())
    }

    /// Members of every type related to the selected weaknesses
    async fn weakness_group(&self, weaknesses: &BTreeSet<String>) -> Result<Vec<BasicInfo>, CatalogError> {
        let table = self.catalog.damage_table().await?;
        let related = weakness::related_types(&table, weaknesses);
        if related.is_empty() {
            debug!("No types related to weaknesses {:?}", weaknesses);
            return Ok(Vec::new());
        }
        self.category_group(CategoryKind::Type, related.iter()).await
    }

    /// Resolve references to detail records, dropping any that fail
    async fn resolve(&self, survivors: &[BasicInfo]) -> Vec<DetailRecord> {
        let lookups = survivors.iter().map(|info| async move {
            let key = info.lookup_key();
            match self.catalog.get_detail(&key).await {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("Failed to fetch details for {} (ID: {}): {}", info.name, key, err);
                    None
                }
            }
        });
        join_all(lookups).await.into_iter().flatten().collect()
    }

    /// Category names for the filter panel, fetched concurrently and cached
    pub async fn filter_options(&self) -> Result<FilterOptions, CatalogError> {
        let (types, generations, abilities) = tokio::try_join!(
            self.catalog.category_names(CategoryKind::Type),
            self.catalog.category_names(CategoryKind::Generation),
            self.catalog.category_names(CategoryKind::Ability),
        )?;
        Ok(FilterOptions {
            types: types.to_vec(),
            generations: generations.to_vec(),
            abilities: abilities.to_vec(),
            weaknesses: types.to_vec(),
        })
    }
}

fn intersect(candidates: &mut Vec<BasicInfo>, group: &[BasicInfo]) {
    let names: HashSet<&str> = group.iter().map(|info| info.name.as_str()).collect();
    candidates.retain(|info| names.contains(info.name.as_str()));
}
