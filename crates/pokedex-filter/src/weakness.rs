//! Weakness groups derived from the damage table
//!
//! Selecting weakness `W` matches records whose type appears in
//! `double_damage_from` of `W`. This is the literal relation the catalog
//! exposes, kept as-is.

use std::collections::{BTreeSet, HashSet};

use pokedex_core::DamageTable;

/// Types listed in `double_damage_from` of `weakness`; empty for unknown types
pub fn weak_to_types<'a>(table: &'a DamageTable, weakness: &str) -> &'a [String] {
    table
        .get(weakness)
        .map(|relation| relation.double_damage_from.as_slice())
        .unwrap_or(&[])
}

/// Union of the related types of every selected weakness, first occurrence order
pub fn related_types(table: &DamageTable, weaknesses: &BTreeSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    weaknesses
        .iter()
        .flat_map(|weakness| weak_to_types(table, weakness))
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}
