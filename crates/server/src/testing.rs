//! Shared doubles for server tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use eiregion_core::{CacheDb, Error, PostalFields, RegionFields, RemoteSource, Resolver};

/// Serves the Ottawa pages, or fails every fetch when `offline`.
#[derive(Default)]
pub struct StaticSource {
    pub offline: bool,
    pub fetches: AtomicUsize,
}

impl StaticSource {
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteSource for StaticSource {
    async fn fetch_postal_page(&self, postal_code: &str) -> Result<PostalFields, Error> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(Error::HttpError("network error: connection refused".into()));
        }
        Ok(PostalFields {
            postal_code: postal_code.to_string(),
            census_subdivision_name: "Ottawa".into(),
            common_name: "Ottawa".into(),
            census_division_name: "Ottawa".into(),
            economic_region_name: "Ottawa".into(),
            economic_region_url: "eiregion.aspx?id=35".into(),
        })
    }

    async fn fetch_region_page(&self, _locator: &str) -> Result<RegionFields, Error> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(Error::HttpError("network error: connection refused".into()));
        }
        Ok(RegionFields {
            province: "ON".into(),
            economic_region_code: "3520".into(),
            economic_region_name: "Ottawa".into(),
            unemployment_rate: "5.6".into(),
            insured_hours_required: "700".into(),
            min_weeks_payable: "14".into(),
            max_weeks_payable: "45".into(),
            best_weeks_required: "14".into(),
        })
    }
}

/// Resolver over a fresh in-memory store, returned with both handles.
pub async fn resolver(offline: bool) -> (Resolver, CacheDb, Arc<StaticSource>) {
    let db = CacheDb::open_in_memory().await.unwrap();
    let source = Arc::new(StaticSource { offline, ..Default::default() });
    let resolver = Resolver::new(Arc::new(db.clone()), source.clone());
    (resolver, db, source)
}
