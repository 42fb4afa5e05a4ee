//! The EI economic region website as a [`RemoteSource`].

use async_trait::async_trait;
use url::Url;

use eiregion_core::{AppConfig, Error, PostalFields, RegionFields, RemoteSource};

use crate::extract::{extract_postal, extract_region};
use crate::fetch::{FetchClient, FetchConfig, parse_base, postal_url, resolve_locator};

/// Fetches postal and region pages beneath one base URL.
#[derive(Clone)]
pub struct EiRegionSite {
    client: FetchClient,
    base_url: Url,
    postal_path: String,
}

impl EiRegionSite {
    /// Create a site client from explicit parts.
    pub fn new(client: FetchClient, base_url: &str, postal_path: impl Into<String>) -> Result<Self, Error> {
        let base_url = parse_base(base_url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        Ok(Self { client, base_url, postal_path: postal_path.into() })
    }

    /// Create a site client from application configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let client = FetchClient::new(FetchConfig::from(config))?;
        Self::new(client, &config.base_url, config.postal_path.clone())
    }

    /// Root URL that locators resolve against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn fetch_html(&self, url: &Url) -> Result<String, Error> {
        let response = self.client.fetch(url).await?;
        Ok(response.text())
    }
}

#[async_trait]
impl RemoteSource for EiRegionSite {
    async fn fetch_postal_page(&self, postal_code: &str) -> Result<PostalFields, Error> {
        let url = postal_url(&self.base_url, &self.postal_path, postal_code)
            .map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let html = self.fetch_html(&url).await?;
        extract_postal(&html)
    }

    async fn fetch_region_page(&self, locator: &str) -> Result<RegionFields, Error> {
        let url = resolve_locator(&self.base_url, locator).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let html = self.fetch_html(&url).await?;
        extract_region(&html)
    }
}
