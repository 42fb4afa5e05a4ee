//! Two-level cache-or-fetch resolution of postal codes.
//!
//! A postal code lookup reads the postal table, refetches the postal page on a
//! miss or stale hit, then resolves the referenced economic region the same
//! way. The steps run strictly in order: store read, remote fetch, store
//! write, dependent lookup. No lock is held across any of them, so two
//! concurrent lookups for the same key may both fetch and both upsert; the
//! last write wins and the end state is the same.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::cache::{PostalRecord, RecordStore, RegionRecord};
use crate::freshness::FreshnessPolicy;
use crate::source::RemoteSource;

/// Economic region statistics returned by a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct RegionResult {
    #[serde(flatten)]
    pub record: RegionRecord,
    /// Whether the row was served from the store without a fetch.
    pub cache_hit: bool,
}

/// Postal code lookup result with its economic region nested inside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct PostalResult {
    #[serde(flatten)]
    pub record: PostalRecord,
    /// Whether the postal row was served from the store without a fetch.
    pub cache_hit: bool,
    pub economic_region: RegionResult,
}

/// A stored postal record read without any refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CachedPostal {
    #[serde(flatten)]
    pub record: PostalRecord,
    /// Whether the freshness policy would refetch this row.
    pub stale: bool,
}

/// Canonical store key for a postal code: ASCII uppercase, no whitespace.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if nothing is left after stripping whitespace
/// or if any remaining character is not an ASCII letter or digit.
pub fn normalize_postal_code(input: &str) -> Result<String, Error> {
    let key: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if key.is_empty() {
        return Err(Error::InvalidInput("postal code cannot be empty".into()));
    }

    if !key.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::InvalidInput(format!("postal code contains invalid characters: {input}")));
    }

    Ok(key)
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Resolves postal codes and economic regions against a store and a remote source.
///
/// Cloning is cheap; clones share the same store and source.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn RecordStore>,
    source: Arc<dyn RemoteSource>,
    freshness: FreshnessPolicy,
}

impl Resolver {
    /// Create a resolver using the default freshness policy.
    pub fn new(store: Arc<dyn RecordStore>, source: Arc<dyn RemoteSource>) -> Self {
        Self { store, source, freshness: FreshnessPolicy::default() }
    }

    /// Replace the freshness policy.
    pub fn with_freshness(mut self, freshness: FreshnessPolicy) -> Self {
        self.freshness = freshness;
        self
    }

    /// The freshness policy in use.
    pub fn freshness(&self) -> FreshnessPolicy {
        self.freshness
    }

    /// Resolve a postal code and its economic region.
    ///
    /// A region failure fails the whole lookup even when the postal row was
    /// already written.
    pub async fn lookup_postal(&self, postal_code: &str) -> Result<PostalResult, Error> {
        let key = normalize_postal_code(postal_code)?;

        let (record, cache_hit) = match self.store.get_postal(&key).await? {
            Some(record) if !self.freshness.is_stale_rfc3339(&record.date_retrieved) => {
                tracing::debug!(postal_code = %key, "postal cache hit");
                (record, true)
            }
            stored => {
                tracing::debug!(postal_code = %key, stale = stored.is_some(), "postal cache miss");
                let fields = self.source.fetch_postal_page(&key).await?;
                if fields.economic_region_name.trim().is_empty() || fields.economic_region_url.trim().is_empty() {
                    return Err(Error::ExtractFailed(format!("postal page for {key} names no economic region")));
                }
                let record = PostalRecord {
                    postal_code: key.clone(),
                    census_subdivision_name: fields.census_subdivision_name,
                    common_name: fields.common_name,
                    census_division_name: fields.census_division_name,
                    economic_region_name: fields.economic_region_name,
                    economic_region_url: fields.economic_region_url,
                    date_retrieved: now_rfc3339(),
                };
                self.store.upsert_postal(&record).await?;
                tracing::info!(postal_code = %key, region = %record.economic_region_name, "stored postal record");
                (record, false)
            }
        };

        let economic_region = self
            .lookup_region(&record.economic_region_name, &record.economic_region_url)
            .await?;

        Ok(PostalResult { record, cache_hit, economic_region })
    }

    /// Resolve an economic region by name, refetching through `locator` when needed.
    ///
    /// The fetched row is stored under `region_name` so later lookups by the
    /// same name hit the cache.
    pub async fn lookup_region(&self, region_name: &str, locator: &str) -> Result<RegionResult, Error> {
        if region_name.trim().is_empty() {
            return Err(Error::InvalidInput("economic region name cannot be empty".into()));
        }

        if let Some(record) = self.store.get_region(region_name).await?
            && !self.freshness.is_stale_rfc3339(&record.date_retrieved)
        {
            tracing::debug!(region = region_name, "region cache hit");
            return Ok(RegionResult { record, cache_hit: true });
        }

        tracing::debug!(region = region_name, locator, "region cache miss");
        let fields = self.source.fetch_region_page(locator).await?;

        if fields.economic_region_name != region_name {
            tracing::debug!(
                region = region_name,
                scraped = %fields.economic_region_name,
                "region page names a different region; keeping requested key"
            );
        }

        let record = RegionRecord {
            economic_region_name: region_name.to_string(),
            province: fields.province,
            economic_region_code: fields.economic_region_code,
            unemployment_rate: fields.unemployment_rate,
            insured_hours_required: fields.insured_hours_required,
            min_weeks_payable: fields.min_weeks_payable,
            max_weeks_payable: fields.max_weeks_payable,
            best_weeks_required: fields.best_weeks_required,
            date_retrieved: now_rfc3339(),
        };
        self.store.upsert_region(&record).await?;
        tracing::info!(region = region_name, "stored region record");

        Ok(RegionResult { record, cache_hit: false })
    }

    /// Read the stored postal record without contacting the remote source.
    pub async fn cached_postal(&self, postal_code: &str) -> Result<Option<CachedPostal>, Error> {
        let key = normalize_postal_code(postal_code)?;
        let cached = self.store.get_postal(&key).await?.map(|record| {
            let stale = self.freshness.is_stale_rfc3339(&record.date_retrieved);
            CachedPostal { record, stale }
        });
        Ok(cached)
    }
}
