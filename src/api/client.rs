//! PokeAPI Client
//!
//! Fetches API resources over HTTP, consulting the response cache first.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

/// HTTP client for the PokeAPI, fronted by the response cache.
///
/// Raw response bodies are cached under the exact request URL.
#[derive(Debug)]
pub struct PokeApiClient {
    http: Client,
    base_url: String,
    cache: Cache,
}

impl PokeApiClient {
    /// Creates a client for `config.base_url` that caches into `cache`.
    pub fn new(config: &Config, cache: Cache) -> Result<Self> {
        let http = Client::builder().timeout(config.http_timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Consumes the client, handing back the cache so it can be closed.
    pub fn into_cache(self) -> Cache {
        self.cache
    }

    // == URLs ==
    /// URL of the first page of the location area listing.
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area", self.base_url)
    }

    pub fn location_area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}", self.base_url, name)
    }

    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name)
    }

    // == Fetch ==
    /// Returns the body at `url`, from the cache when present.
    ///
    /// Only successful responses are cached. A 404 maps to
    /// [`PokedexError::NotFound`].
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(body) = self.cache.get(url) {
            debug!("[cache] hit {}", url);
            return Ok(body);
        }
        debug!("[cache] miss {}", url);

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(PokedexError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(PokedexError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        info!("Fetched {} ({} bytes)", url, body.len());

        self.cache.add(url, &body);
        Ok(body.to_vec())
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // == Resources ==
    /// Fetches a page of location areas; the first page when `url` is `None`.
    pub async fn location_areas(&self, url: Option<&str>) -> Result<LocationAreaPage> {
        match url {
            Some(url) => self.fetch_json(url).await,
            None => self.fetch_json(&self.location_areas_url()).await,
        }
    }

    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        self.fetch_json(&self.location_area_url(name)).await
    }

    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        self.fetch_json(&self.pokemon_url(name)).await
    }
}
