//! Remote source abstraction.
//!
//! The resolver only needs the raw fields of a postal or region page; how the
//! page is fetched and parsed lives in the client crate.

use async_trait::async_trait;

use crate::Error;

/// Fields read from the first data row of a postal code page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostalFields {
    pub postal_code: String,
    pub census_subdivision_name: String,
    pub common_name: String,
    pub census_division_name: String,
    /// Anchor text of the region cell.
    pub economic_region_name: String,
    /// Anchor href of the region cell, relative to the source root.
    pub economic_region_url: String,
}

/// Fields read from an economic region page, one value per column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionFields {
    pub province: String,
    pub economic_region_code: String,
    pub economic_region_name: String,
    pub unemployment_rate: String,
    pub insured_hours_required: String,
    pub min_weeks_payable: String,
    pub max_weeks_payable: String,
    pub best_weeks_required: String,
}

/// A source of postal and region pages.
///
/// Implementations report transport problems and extraction problems with
/// distinct [`Error`] variants; both are [`crate::ErrorKind::Fetch`].
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch and extract the postal page for an already-normalized postal code.
    async fn fetch_postal_page(&self, postal_code: &str) -> Result<PostalFields, Error>;

    /// Fetch and extract the region page addressed by `locator`.
    async fn fetch_region_page(&self, locator: &str) -> Result<RegionFields, Error>;
}
