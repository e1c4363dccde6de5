//! Wire shapes of the PokeAPI v2 responses consumed by the client

use pokedex_core::{BasicInfo, Cries, DamageRelation, DetailRecord, Sprites, TypeSlot};
use serde::{Deserialize, Serialize};

/// `{ name, url }` reference used by every list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl From<NamedResource> for BasicInfo {
    fn from(resource: NamedResource) -> Self {
        BasicInfo::new(resource.name, resource.url)
    }
}

/// Paginated list envelope from `/pokemon`, `/type`, `/generation`, `/ability`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// Detail record from `/pokemon/{id or name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: SpritesResponse,
    #[serde(default)]
    pub types: Vec<TypeSlotResponse>,
    #[serde(default)]
    pub cries: Option<CriesResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpritesResponse {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
    #[serde(default)]
    pub versions: Option<VersionSprites>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<ArtworkSprites>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtworkSprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionSprites {
    #[serde(rename = "generation-v", default)]
    pub generation_v: Option<GenerationVSprites>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationVSprites {
    #[serde(rename = "black-white", default)]
    pub black_white: Option<BlackWhiteSprites>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlackWhiteSprites {
    #[serde(default)]
    pub animated: Option<AnimatedSprites>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimatedSprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlotResponse {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CriesResponse {
    #[serde(default)]
    pub latest: Option<String>,
}

impl From<PokemonResponse> for DetailRecord {
    fn from(response: PokemonResponse) -> Self {
        let sprites = response.sprites;
        let official_artwork = sprites
            .other
            .and_then(|other| other.official_artwork)
            .and_then(|artwork| artwork.front_default);
        let animated = sprites
            .versions
            .and_then(|versions| versions.generation_v)
            .and_then(|gen| gen.black_white)
            .and_then(|bw| bw.animated)
            .and_then(|animated| animated.front_default);

        DetailRecord {
            id: response.id,
            name: response.name,
            sprites: Sprites {
                front_default: sprites.front_default,
                back_default: sprites.back_default,
                official_artwork,
                animated,
            },
            types: response
                .types
                .into_iter()
                .map(|slot| TypeSlot {
                    slot: slot.slot,
                    type_name: slot.kind.name,
                })
                .collect(),
            cries: Cries {
                latest: response.cries.and_then(|cries| cries.latest),
            },
        }
    }
}

/// `{ pokemon: { name, url } }` entry of type and ability member lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonMember {
    pub pokemon: NamedResource,
}

/// Detail of one type from `/type/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeResponse {
    pub name: String,
    #[serde(default)]
    pub damage_relations: DamageRelationsResponse,
    #[serde(default)]
    pub pokemon: Vec<PokemonMember>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DamageRelationsResponse {
    #[serde(default)]
    pub double_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub double_damage_to: Vec<NamedResource>,
    #[serde(default)]
    pub half_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub half_damage_to: Vec<NamedResource>,
    #[serde(default)]
    pub no_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub no_damage_to: Vec<NamedResource>,
}

fn names(resources: Vec<NamedResource>) -> Vec<String> {
    resources.into_iter().map(|r| r.name).collect()
}

impl From<DamageRelationsResponse> for DamageRelation {
    fn from(relations: DamageRelationsResponse) -> Self {
        DamageRelation {
            double_damage_from: names(relations.double_damage_from),
            double_damage_to: names(relations.double_damage_to),
            half_damage_from: names(relations.half_damage_from),
            half_damage_to: names(relations.half_damage_to),
            no_damage_from: names(relations.no_damage_from),
            no_damage_to: names(relations.no_damage_to),
        }
    }
}

/// Detail of one ability from `/ability/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityResponse {
    #[serde(default)]
    pub pokemon: Vec<PokemonMember>,
}

/// Detail of one generation from `/generation/{name}`; members are species
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub pokemon_species: Vec<NamedResource>,
}
