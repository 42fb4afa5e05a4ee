//! Postal search page extraction.

use eiregion_core::{Error, PostalFields};

use super::table::data_rows;

/// Cells in a postal row: code, subdivision, common name, division, region anchor.
pub const POSTAL_CELLS: usize = 5;

/// Read the first data row of a postal search page.
///
/// # Errors
///
/// - `Error::NoMatchingRow` if the page has no data row
/// - `Error::ExtractFailed` if the first row has fewer than five cells or its
///   fifth cell holds no region anchor with both text and href
pub fn extract_postal(html: &str) -> Result<PostalFields, Error> {
    let rows = data_rows(html);
    let row = rows
        .first()
        .ok_or_else(|| Error::NoMatchingRow("postal page has no data row".into()))?;

    if row.len() < POSTAL_CELLS {
        return Err(Error::ExtractFailed(format!(
            "postal row has {} cells, expected {}",
            row.len(),
            POSTAL_CELLS
        )));
    }

    let link = row[4]
        .link
        .as_ref()
        .filter(|l| !l.href.is_empty() && !l.text.is_empty())
        .ok_or_else(|| Error::ExtractFailed("postal row has no economic region link".into()))?;

    Ok(PostalFields {
        postal_code: row[0].text.clone(),
        census_subdivision_name: row[1].text.clone(),
        common_name: row[2].text.clone(),
        census_division_name: row[3].text.clone(),
        economic_region_name: link.text.clone(),
        economic_region_url: link.href.clone(),
    })
}
