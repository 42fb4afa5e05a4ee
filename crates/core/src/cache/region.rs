//! Economic region record operations.

use super::connection::CacheDb;
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// Cached EI statistics for one economic region.
///
/// All values are opaque text as published by the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct RegionRecord {
    pub economic_region_name: String,
    pub province: String,
    pub economic_region_code: String,
    pub unemployment_rate: String,
    pub insured_hours_required: String,
    pub min_weeks_payable: String,
    pub max_weeks_payable: String,
    pub best_weeks_required: String,
    /// RFC 3339 timestamp of when the row was written.
    pub date_retrieved: String,
}

impl CacheDb {
    /// Insert or replace a region record keyed by region name.
    pub async fn upsert_region(&self, record: &RegionRecord) -> Result<(), Error> {
        let record = record.clone();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO economic_region_data (
                    economic_region_name, province, economic_region_code, unemployment_rate,
                    insured_hours_required, min_weeks_payable, max_weeks_payable,
                    best_weeks_required, date_retrieved
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                ON CONFLICT(economic_region_name) DO UPDATE SET
                    province = excluded.province,
                    economic_region_code = excluded.economic_region_code,
                    unemployment_rate = excluded.unemployment_rate,
                    insured_hours_required = excluded.insured_hours_required,
                    min_weeks_payable = excluded.min_weeks_payable,
                    max_weeks_payable = excluded.max_weeks_payable,
                    best_weeks_required = excluded.best_weeks_required,
                    date_retrieved = excluded.date_retrieved",
                    params![
                        &record.economic_region_name,
                        &record.province,
                        &record.economic_region_code,
                        &record.unemployment_rate,
                        &record.insured_hours_required,
                        &record.min_weeks_payable,
                        &record.max_weeks_payable,
                        &record.best_weeks_required,
                        &record.date_retrieved,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Get a region record by name.
    pub async fn get_region(&self, economic_region_name: &str) -> Result<Option<RegionRecord>, Error> {
        let name = economic_region_name.to_string();
        self.conn
            .call(move |conn| -> Result<Option<RegionRecord>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT
                    economic_region_name, province, economic_region_code, unemployment_rate,
                    insured_hours_required, min_weeks_payable, max_weeks_payable,
                    best_weeks_required, date_retrieved
                FROM economic_region_data WHERE economic_region_name = ?1",
                )?;

                let result = stmt.query_row(params![name], |row| {
                    Ok(RegionRecord {
                        economic_region_name: row.get(0)?,
                        province: row.get(1)?,
                        economic_region_code: row.get(2)?,
                        unemployment_rate: row.get(3)?,
                        insured_hours_required: row.get(4)?,
                        min_weeks_payable: row.get(5)?,
                        max_weeks_payable: row.get(6)?,
                        best_weeks_required: row.get(7)?,
                        date_retrieved: row.get(8)?,
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

    /// Number of stored region records.
    pub async fn region_count(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM economic_region_data", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
