use async_trait::async_trait;
use pokedex_core::{BasicInfo, CatalogPage, CategoryKind, DamageTable, DetailRecord};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::ApiConfig;
use crate::error::CatalogError;
use crate::fanout::fan_out;
use crate::source::CatalogSource;
use crate::types::*;

/// Catalog client backed by the live PokeAPI over HTTP
pub struct PokeApiClient {
    client: Client,
    config: ApiConfig,
}

impl PokeApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CatalogError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Build on an existing HTTP client, sharing its connection pool
    pub fn with_client(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    /// URL of the pokemon resource for an id or name
    fn pokemon_url(&self, id_or_name: &str) -> String {
        self.config.endpoint(&format!("pokemon/{}", id_or_name))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, resource: &str) -> Result<T, CatalogError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        handle_response(response, resource).await
    }

    async fn get_detail_url(&self, url: &str, resource: &str) -> Result<DetailRecord, CatalogError> {
        let response: PokemonResponse = self.get_json(url, resource).await?;
        Ok(response.into())
    }

    async fn list_resources(&self, path: &str) -> Result<ResourceList, CatalogError> {
        let url = format!("{}?limit={}", self.config.endpoint(path), self.config.all_limit);
        self.get_json(&url, path).await
    }
}

#[async_trait]
impl CatalogSource for PokeApiClient {
    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn list_page(&self, limit: u32, offset: u32) -> Result<CatalogPage, CatalogError> {
        let url = format!("{}?limit={}&offset={}", self.config.endpoint("pokemon"), limit, offset);
        let list: ResourceList = self.get_json(&url, "pokemon").await?;
        if list.results.is_empty() {
            return Ok(CatalogPage {
                records: Vec::new(),
                total_count: list.count,
            });
        }

        let records = fan_out(
            list.results
                .iter()
                .map(|resource| self.get_detail_url(&resource.url, &resource.name)),
        )
        .await?;

        Ok(CatalogPage {
            records,
            total_count: list.count,
        })
    }

    async fn get_detail(&self, id_or_name: &str) -> Result<DetailRecord, CatalogError> {
        self.get_detail_url(&self.pokemon_url(id_or_name), id_or_name).await
    }

    async fn list_all_basic_info(&self) -> Result<Vec<BasicInfo>, CatalogError> {
        let list = self.list_resources("pokemon").await?;
        info!("Fetched name index with {} entries", list.results.len());
        Ok(list.results.into_iter().map(BasicInfo::from).collect())
    }

    async fn list_category_names(&self, kind: CategoryKind) -> Result<Vec<String>, CatalogError> {
        let list = self.list_resources(kind.path()).await?;
        Ok(list.results.into_iter().map(|resource| resource.name).collect())
    }

    async fn list_member_refs(
        &self,
        kind: CategoryKind,
        name: &str,
    ) -> Result<Vec<BasicInfo>, CatalogError> {
        let url = self.config.endpoint(&format!("{}/{}", kind.path(), name));
        let resource = format!("{} {}", kind, name);

        let members = match kind {
            CategoryKind::Type => {
                let response: TypeResponse = self.get_json(&url, &resource).await?;
                response.pokemon.into_iter().map(|m| BasicInfo::from(m.pokemon)).collect()
            }
            CategoryKind::Ability => {
                let response: AbilityResponse = self.get_json(&url, &resource).await?;
                response.pokemon.into_iter().map(|m| BasicInfo::from(m.pokemon)).collect()
            }
            // Generations list species; the matching pokemon resource shares the species name.
            CategoryKind::Generation => {
                let response: GenerationResponse = self.get_json(&url, &resource).await?;
                response
                    .pokemon_species
                    .into_iter()
                    .map(|species| {
                        let url = self.pokemon_url(&species.name);
                        BasicInfo::new(species.name, url)
                    })
                    .collect()
            }
        };

        Ok(members)
    }

    async fn list_members(
        &self,
        kind: CategoryKind,
        name: &str,
    ) -> Result<Vec<DetailRecord>, CatalogError> {
        let refs = self.list_member_refs(kind, name).await?;
        fan_out(refs.iter().map(|info| self.get_detail_url(&info.url, &info.name))).await
    }

    async fn list_damage_relations(&self) -> Result<DamageTable, CatalogError> {
        let types = self.list_resources(CategoryKind::Type.path()).await?;
        let details: Vec<TypeResponse> = fan_out(
            types
                .results
                .iter()
                .map(|resource| self.get_json::<TypeResponse>(&resource.url, &resource.name)),
        )
        .await?;

        info!("Fetched damage relations for {} types", details.len());
        Ok(details
            .into_iter()
            .map(|detail| (detail.name, detail.damage_relations.into()))
            .collect())
    }
}

async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
    resource: &str,
) -> Result<T, CatalogError> {
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(CatalogError::NotFound(resource.to_string()));
    }
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(CatalogError::ServerError {
            status: status.as_u16(),
            message: text,
        });
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
