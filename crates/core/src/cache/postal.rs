//! Postal code record operations.
//!
//! One row per normalized postal code, mapping it to its census geography and
//! the EI economic region that covers it.

use super::connection::CacheDb;
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// A cached postal code lookup.
///
/// Field values are stored verbatim as scraped; only `postal_code` is
/// normalized since it is the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct PostalRecord {
    pub postal_code: String,
    pub census_subdivision_name: String,
    pub common_name: String,
    pub census_division_name: String,
    #[serde(rename = "EIEconomicRegionName")]
    pub economic_region_name: String,
    #[serde(rename = "EIEconomicRegionURL")]
    pub economic_region_url: String,
    /// RFC 3339 timestamp of when the row was written.
    pub date_retrieved: String,
}

impl CacheDb {
    /// Insert or replace a postal record.
    ///
    /// Uses UPSERT semantics: every non-key column is overwritten when the
    /// postal code already exists.
    pub async fn upsert_postal(&self, record: &PostalRecord) -> Result<(), Error> {
        let record = record.clone();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO postal_code_data (
                    postal_code, census_subdivision_name, common_name, census_division_name,
                    ei_economic_region_name, ei_economic_region_url, date_retrieved
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ON CONFLICT(postal_code) DO UPDATE SET
                    census_subdivision_name = excluded.census_subdivision_name,
                    common_name = excluded.common_name,
                    census_division_name = excluded.census_division_name,
                    ei_economic_region_name = excluded.ei_economic_region_name,
                    ei_economic_region_url = excluded.ei_economic_region_url,
                    date_retrieved = excluded.date_retrieved",
                    params![
                        &record.postal_code,
                        &record.census_subdivision_name,
                        &record.common_name,
                        &record.census_division_name,
                        &record.economic_region_name,
                        &record.economic_region_url,
                        &record.date_retrieved,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Get a postal record by its normalized postal code.
    ///
    /// Returns None if the code has never been stored.
    pub async fn get_postal(&self, postal_code: &str) -> Result<Option<PostalRecord>, Error> {
        let postal_code = postal_code.to_string();
        self.conn
            .call(move |conn| -> Result<Option<PostalRecord>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT
                    postal_code, census_subdivision_name, common_name, census_division_name,
                    ei_economic_region_name, ei_economic_region_url, date_retrieved
                FROM postal_code_data WHERE postal_code = ?1",
                )?;

                let result = stmt.query_row(params![postal_code], |row| {
                    Ok(PostalRecord {
                        postal_code: row.get(0)?,
                        census_subdivision_name: row.get(1)?,
                        common_name: row.get(2)?,
                        census_division_name: row.get(3)?,
                        economic_region_name: row.get(4)?,
                        economic_region_url: row.get(5)?,
                        date_retrieved: row.get(6)?,
                    })
                });

                match result {
                    Ok(r) => Ok(Some(r)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Number of stored postal records.
    pub async fn postal_count(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM postal_code_data", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
