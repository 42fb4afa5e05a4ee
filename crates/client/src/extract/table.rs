//! Table row harvesting from HTML documents.

use scraper::{ElementRef, Html, Selector};

/// An anchor found inside a table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Link text content
    pub text: String,
    /// Raw href attribute, unresolved
    pub href: String,
}

/// One `<td>` of a data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Cell text with whitespace runs collapsed to single spaces
    pub text: String,
    /// First anchor with an href inside the cell, if any
    pub link: Option<Link>,
}

/// Collect every data row of every table in document order.
///
/// A data row is a `<tr>` holding at least one `<td>`; header rows made only
/// of `<th>` are skipped. Only direct `<td>` children count as cells.
pub fn data_rows(html: &str) -> Vec<Vec<Cell>> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("tr").expect("invalid selector");
    let anchor_selector = Selector::parse("a[href]").expect("invalid selector");

    document
        .select(&row_selector)
        .map(|row| {
            row.children()
                .filter_map(ElementRef::wrap)
                .filter(|el| el.value().name() == "td")
                .map(|td| Cell {
                    text: collapse(td.text()),
                    link: td.select(&anchor_selector).next().map(|a| Link {
                        text: collapse(a.text()),
                        href: a.value().attr("href").unwrap_or_default().trim().to_string(),
                    }),
                })
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect()
}

fn collapse<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}
