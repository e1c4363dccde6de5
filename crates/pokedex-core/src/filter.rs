//! Filter criteria snapshot
//!
//! Criteria are replaced wholesale on every edit, so consumers only ever
//! observe a complete snapshot.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::CategoryKind;

/// User-selected filters for the catalog list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text name filter
    pub search_term: String,
    pub types: BTreeSet<String>,
    pub generations: BTreeSet<String>,
    pub abilities: BTreeSet<String>,
    /// Types the results must be weak to
    pub weaknesses: BTreeSet<String>,
}

impl FilterCriteria {
    /// Criteria matching only a free-text term
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..Default::default()
        }
    }

    /// Builder-style helper that selects `names` in the given category group
    pub fn with_category<I, S>(mut self, kind: CategoryKind, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_mut(kind).extend(names.into_iter().map(Into::into));
        self
    }

    /// Builder-style helper that selects weakness types
    pub fn with_weaknesses<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.weaknesses.extend(names.into_iter().map(Into::into));
        self
    }

    /// Selected names of one category group
    pub fn category(&self, kind: CategoryKind) -> &BTreeSet<String> {
        match kind {
            CategoryKind::Type => &self.types,
            CategoryKind::Generation => &self.generations,
            CategoryKind::Ability => &self.abilities,
        }
    }

    pub fn category_mut(&mut self, kind: CategoryKind) -> &mut BTreeSet<String> {
        match kind {
            CategoryKind::Type => &mut self.types,
            CategoryKind::Generation => &mut self.generations,
            CategoryKind::Ability => &mut self.abilities,
        }
    }

    /// Trimmed, lowercased search term; `None` when blank
    pub fn normalized_term(&self) -> Option<String> {
        let term = self.search_term.trim();
        if term.is_empty() {
            None
        } else {
            Some(term.to_lowercase())
        }
    }

    /// The search term as a direct record id, when it is purely numeric
    pub fn numeric_id(&self) -> Option<u32> {
        self.normalized_term()?.parse().ok()
    }

    /// True when no criterion is active and the default browse page applies
    pub fn is_empty(&self) -> bool {
        self.normalized_term().is_none()
            && self.types.is_empty()
            && self.generations.is_empty()
            && self.abilities.is_empty()
            && self.weaknesses.is_empty()
    }
}
