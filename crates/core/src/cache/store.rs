//! Store abstraction consumed by the resolver.
//!
//! `CacheDb` is the production implementation; tests may substitute their own.

use async_trait::async_trait;

use super::connection::CacheDb;
use super::postal::PostalRecord;
use super::region::RegionRecord;
use crate::Error;

/// Read-by-key and upsert-by-key access to the two lookup tables.
///
/// Each call is atomic on its own; there is no transaction spanning tables.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read a postal record by normalized postal code.
    async fn get_postal(&self, postal_code: &str) -> Result<Option<PostalRecord>, Error>;

    /// Insert or overwrite a postal record.
    async fn upsert_postal(&self, record: &PostalRecord) -> Result<(), Error>;

    /// Read a region record by economic region name.
    async fn get_region(&self, economic_region_name: &str) -> Result<Option<RegionRecord>, Error>;

    /// Insert or overwrite a region record.
    async fn upsert_region(&self, record: &RegionRecord) -> Result<(), Error>;
}

#[async_trait]
impl RecordStore for CacheDb {
    async fn get_postal(&self, postal_code: &str) -> Result<Option<PostalRecord>, Error> {
        CacheDb::get_postal(self, postal_code).await
    }

    async fn upsert_postal(&self, record: &PostalRecord) -> Result<(), Error> {
        CacheDb::upsert_postal(self, record).await
    }

    async fn get_region(&self, economic_region_name: &str) -> Result<Option<RegionRecord>, Error> {
        CacheDb::get_region(self, economic_region_name).await
    }

    async fn upsert_region(&self, record: &RegionRecord) -> Result<(), Error> {
        CacheDb::upsert_region(self, record).await
    }
}
