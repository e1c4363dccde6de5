//! Catalog record types shared across the Pokedex crates

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placeholder artwork for list cards without a sprite
pub const FALLBACK_LIST_IMAGE: &str = "data:image/svg+xml;utf8,<svg width='150' height='150' viewBox='0 0 150 150' xmlns='http://www.w3.org/2000/svg'><rect x='0' y='0' width='150' height='150' fill='%23E0E0E0'/><path d='M10 140 L140 10 L140 140 Z M10 10 L140 10 L10 140 Z' fill='%23999999' stroke='%23666666' stroke-width='5'/></svg>";

/// Placeholder artwork for the detail view when official artwork is missing
pub const FALLBACK_DETAIL_IMAGE: &str = "data:image/svg+xml;utf8,<svg width='150' height='150' viewBox='0 0 150 150' xmlns='http://www.w3.org/2000/svg'><circle cx='75' cy='75' r='70' fill='%23E0E0E0' stroke='%23B0B0B0' stroke-width='3'/><rect x='0' y='72.5' width='150' height='5' fill='%23B0B0B0'/><circle cx='75' cy='75' r='20' fill='%23E0E0E0' stroke='%23B0B0B0' stroke-width='3'/><circle cx='75' cy='75' r='50' fill='%23FF0000' stroke='%23CC0000' stroke-width='4'/><line x1='45' y1='105' x2='105' y2='45' stroke='%23FFFFFF' stroke-width='8' stroke-linecap='round'/></svg>";

/// A grouping axis of the catalog with named members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Type,
    Generation,
    Ability,
}

impl CategoryKind {
    /// Path segment of this category on the catalog API
    pub fn path(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Generation => "generation",
            Self::Ability => "ability",
        }
    }

    /// All category kinds, in the order filter groups are evaluated
    pub fn all() -> &'static [CategoryKind] {
        &[Self::Type, Self::Generation, Self::Ability]
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Returned when parsing a category kind from an unrecognized string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category kind '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for CategoryKind {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "type" | "types" => Ok(Self::Type),
            "gen" | "generation" | "generations" => Ok(Self::Generation),
            "ability" | "abilities" => Ok(Self::Ability),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Lightweight reference to a catalog record, used before full detail is fetched.
///
/// Identity is the `name`; two references with the same name denote the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasicInfo {
    pub name: String,
    pub url: String,
}

impl BasicInfo {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Numeric id embedded as the last path segment of the resource URL
    pub fn id(&self) -> Option<u32> {
        self.url
            .split('/')
            .filter(|segment| !segment.is_empty())
            .last()
            .and_then(|segment| segment.parse().ok())
    }

    /// Key used to look the record up: the numeric id when the URL carries one, else the name
    pub fn lookup_key(&self) -> String {
        match self.id() {
            Some(id) => id.to_string(),
            None => self.name.clone(),
        }
    }
}

/// Sprite URLs of a record; every one may be missing upstream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
    pub official_artwork: Option<String>,
    pub animated: Option<String>,
}

/// One entry of a record's ordered type list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    pub type_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cries {
    pub latest: Option<String>,
}

/// Fully resolved catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: u32,
    pub name: String,
    pub sprites: Sprites,
    pub types: Vec<TypeSlot>,
    pub cries: Cries,
}

impl DetailRecord {
    /// Project back to a basic reference rooted at `base_url`
    pub fn basic_info(&self, base_url: &str) -> BasicInfo {
        BasicInfo {
            name: self.name.clone(),
            url: format!("{}/pokemon/{}/", base_url.trim_end_matches('/'), self.id),
        }
    }

    /// Type names in slot order
    pub fn type_names(&self) -> Vec<&str> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|slot| slot.slot);
        slots.into_iter().map(|slot| slot.type_name.as_str()).collect()
    }

    /// Whether a back sprite exists to alternate with the front one
    pub fn has_back_sprite(&self) -> bool {
        self.sprites.back_default.is_some()
    }

    /// URL of the audio cue, when the catalog has one
    pub fn cry_url(&self) -> Option<&str> {
        self.cries.latest.as_deref()
    }
}

/// Directional type-effectiveness sets for one type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRelation {
    pub double_damage_from: Vec<String>,
    pub double_damage_to: Vec<String>,
    pub half_damage_from: Vec<String>,
    pub half_damage_to: Vec<String>,
    pub no_damage_from: Vec<String>,
    pub no_damage_to: Vec<String>,
}

/// Damage relations of every type, keyed by type name
pub type DamageTable = HashMap<String, DamageRelation>;

/// One page of the default catalog ordering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub records: Vec<DetailRecord>,
    pub total_count: u64,
}
