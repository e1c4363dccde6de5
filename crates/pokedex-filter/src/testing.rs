//! In-memory catalog used by the engine and controller tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use pokedex_api::{Catalog, CatalogError, CatalogSource};
use pokedex_core::{
    BasicInfo, CatalogPage, CategoryKind, Cries, DamageRelation, DamageTable, DetailRecord,
    Sprites, TypeSlot,
};

pub const BASE_URL: &str = "http://fake/api/v2";

pub fn record(id: u32, name: &str, types: &[&str]) -> DetailRecord {
    DetailRecord {
        id,
        name: name.to_string(),
        sprites: Sprites {
            front_default: Some(format!("http://img/{}.png", id)),
            back_default: (id % 2 == 1).then(|| format!("http://img/back/{}.png", id)),
            official_artwork: None,
            animated: None,
        },
        types: types
            .iter()
            .enumerate()
            .map(|(i, name)| TypeSlot {
                slot: i as u8 + 1,
                type_name: name.to_string(),
            })
            .collect(),
        cries: Cries::default(),
    }
}

fn relation(double_damage_from: &[&str]) -> DamageRelation {
    DamageRelation {
        double_damage_from: double_damage_from.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

/// Wrap the fake in the memoizing catalog the engine consumes
pub fn catalog(fake: &Arc<FakeCatalog>) -> Arc<Catalog> {
    Arc::new(Catalog::new(Arc::clone(fake) as Arc<dyn CatalogSource>))
}

/// Catalog fake with a small fixed dataset, injectable failures and delays
#[derive(Default)]
pub struct FakeCatalog {
    records: Vec<DetailRecord>,
    members: HashMap<(CategoryKind, String), Vec<String>>,
    damage: DamageTable,
    failing_details: Mutex<HashSet<String>>,
    failing_categories: Mutex<HashSet<String>>,
    detail_delays: Mutex<HashMap<String, Duration>>,
    page_delay: Mutex<Duration>,
    pub detail_calls: AtomicUsize,
    pub page_calls: AtomicUsize,
    pub index_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        let records = vec![
            record(1, "bulbasaur", &["grass", "poison"]),
            record(4, "charmander", &["fire"]),
            record(5, "charmeleon", &["fire"]),
            record(6, "charizard", &["fire", "flying"]),
            record(7, "squirtle", &["water"]),
            record(25, "pikachu", &["electric"]),
            record(152, "chikorita", &["grass"]),
            record(155, "cyndaquil", &["fire"]),
            record(158, "totodile", &["water"]),
        ];

        let mut members = HashMap::new();
        for r in &records {
            for slot in &r.types {
                members
                    .entry((CategoryKind::Type, slot.type_name.clone()))
                    .or_insert_with(Vec::new)
                    .push(r.name.clone());
            }
            let generation = if r.id <= 151 { "generation-i" } else { "generation-ii" };
            members
                .entry((CategoryKind::Generation, generation.to_string()))
                .or_insert_with(Vec::new)
                .push(r.name.clone());
        }
        let abilities: [(&str, &[&str]); 4] = [
            ("overgrow", &["bulbasaur", "chikorita"]),
            ("blaze", &["charmander", "charmeleon", "charizard", "cyndaquil"]),
            ("torrent", &["squirtle", "totodile"]),
            ("static", &["pikachu"]),
        ];
        for (ability, names) in abilities {
            members.insert(
                (CategoryKind::Ability, ability.to_string()),
                names.iter().map(|n| n.to_string()).collect(),
            );
        }
        members.insert((CategoryKind::Type, "fighting".to_string()), Vec::new());

        let damage = DamageTable::from([
            ("fire".to_string(), relation(&["ground", "rock", "water"])),
            ("water".to_string(), relation(&["electric", "grass"])),
            ("grass".to_string(), relation(&["fire", "ice", "poison", "flying", "bug"])),
            ("electric".to_string(), relation(&["ground"])),
            ("normal".to_string(), relation(&["fighting"])),
            ("ghost".to_string(), relation(&[])),
        ]);

        Self {
            records,
            members,
            damage,
            ..Default::default()
        }
    }

    pub fn fail_detail(&self, key: &str) {
        self.failing_details.lock().insert(key.to_string());
    }

    pub fn fail_category(&self, name: &str) {
        self.failing_categories.lock().insert(name.to_string());
    }

    pub fn delay_detail(&self, key: &str, delay: Duration) {
        self.detail_delays.lock().insert(key.to_string(), delay);
    }

    pub fn delay_pages(&self, delay: Duration) {
        *self.page_delay.lock() = delay;
    }

    pub fn total(&self) -> u64 {
        self.records.len() as u64
    }

    fn url(id: u32) -> String {
        format!("{}/pokemon/{}/", BASE_URL, id)
    }

    fn find(&self, id_or_name: &str) -> Option<&DetailRecord> {
        self.records
            .iter()
            .find(|r| r.name == id_or_name || r.id.to_string() == id_or_name)
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    async fn list_page(&self, limit: u32, offset: u32) -> Result<CatalogPage, CatalogError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.page_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(CatalogPage {
            records: self
                .records
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect(),
            total_count: self.total(),
        })
    }

    async fn get_detail(&self, id_or_name: &str) -> Result<DetailRecord, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.detail_delays.lock().get(id_or_name).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_details.lock().contains(id_or_name) {
            return Err(CatalogError::Network(format!("reset fetching {}", id_or_name)));
        }
        self.find(id_or_name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id_or_name.to_string()))
    }

    async fn list_all_basic_info(&self) -> Result<Vec<BasicInfo>, CatalogError> {
        self.index_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .records
            .iter()
            .map(|r| BasicInfo::new(r.name.clone(), Self::url(r.id)))
            .collect())
    }

    async fn list_category_names(&self, kind: CategoryKind) -> Result<Vec<String>, CatalogError> {
        let mut names: Vec<String> = self
            .members
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, name)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn list_member_refs(
        &self,
        kind: CategoryKind,
        name: &str,
    ) -> Result<Vec<BasicInfo>, CatalogError> {
        if self.failing_categories.lock().contains(name) {
            return Err(CatalogError::Offline);
        }
        let names = self
            .members
            .get(&(kind, name.to_string()))
            .ok_or_else(|| CatalogError::NotFound(format!("{} {}", kind, name)))?;
        Ok(names
            .iter()
            .filter_map(|n| self.find(n))
            .map(|r| BasicInfo::new(r.name.clone(), Self::url(r.id)))
            .collect())
    }

    async fn list_damage_relations(&self) -> Result<DamageTable, CatalogError> {
        Ok(self.damage.clone())
    }
}
