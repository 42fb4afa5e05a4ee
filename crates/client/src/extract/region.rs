//! Economic region page extraction.

use eiregion_core::{Error, RegionFields};

use super::table::{Cell, data_rows};

/// Cells in a region row, in fixed column order.
pub const REGION_CELLS: usize = 8;

/// Read the region statistics table.
///
/// Every data row with at least eight cells overwrites the working record
/// column by column, so the last such row wins.
///
/// # Errors
///
/// Returns `Error::NoMatchingRow` if no row has eight cells.
pub fn extract_region(html: &str) -> Result<RegionFields, Error> {
    let mut fields: Option<RegionFields> = None;

    for row in data_rows(html).iter().filter(|row| row.len() >= REGION_CELLS) {
        let current = fields.get_or_insert_with(RegionFields::default);
        overwrite(current, row);
    }

    fields.ok_or_else(|| Error::NoMatchingRow("region page has no statistics row".into()))
}

fn overwrite(fields: &mut RegionFields, row: &[Cell]) {
    fields.province = row[0].text.clone();
    fields.economic_region_code = row[1].text.clone();
    fields.economic_region_name = row[2].text.clone();
    fields.unemployment_rate = row[3].text.clone();
    fields.insured_hours_required = row[4].text.clone();
    fields.min_weeks_payable = row[5].text.clone();
    fields.max_weeks_payable = row[6].text.clone();
    fields.best_weeks_required = row[7].text.clone();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: [&str; 8]) -> String {
        let tds: String = cells.iter().map(|c| format!("<td>{}</td>", c)).collect();
        format!("<tr>{}</tr>", tds)
    }

    #[test]
    fn test_extract_region_single_row() {
        let html = format!(
            "<table><tr><th>Province</th></tr>{}</table>",
            row(["ON", "3520", "Ottawa", "5.6", "700", "14", "45", "14"])
        );

        let fields = extract_region(&html).unwrap();
        assert_eq!(
            fields,
            RegionFields {
                province: "ON".into(),
                economic_region_code: "3520".into(),
                economic_region_name: "Ottawa".into(),
                unemployment_rate: "5.6".into(),
                insured_hours_required: "700".into(),
                min_weeks_payable: "14".into(),
                max_weeks_payable: "45".into(),
                best_weeks_required: "14".into(),
            }
        );
    }

    #[test]
    fn test_extract_region_last_row_wins() {
        let html = format!(
            "<table>{}{}</table>",
            row(["ON", "3520", "Ottawa", "5.6", "700", "14", "45", "14"]),
            row(["ON", "3520", "Ottawa", "6.1", "665", "15", "45", "14"])
        );

        let fields = extract_region(&html).unwrap();
        assert_eq!(fields.unemployment_rate, "6.1");
        assert_eq!(fields.insured_hours_required, "665");
        assert_eq!(fields.min_weeks_payable, "15");
    }

    #[test]
    fn test_extract_region_skips_short_rows() {
        let html = format!(
            "<table>{}<tr><td>Footnote</td></tr></table>",
            row(["ON", "3520", "Ottawa", "5.6", "700", "14", "45", "14"])
        );

        let fields = extract_region(&html).unwrap();
        assert_eq!(fields.province, "ON");
    }

    #[test]
    fn test_extract_region_no_rows() {
        let html = "<table><tr><td>only</td><td>two</td></tr></table>";
        assert!(matches!(extract_region(html), Err(Error::NoMatchingRow(_))));
    }
}
