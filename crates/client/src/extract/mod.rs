//! Field extraction from the EI region site's HTML tables.
//!
//! ### Postal Search Page
//! - First data row, five cells: postal code, census subdivision name,
//!   common name, census division name, region anchor.
//! - Region name comes from the anchor text and the locator from its href.
//!
//! ### Region Page
//! - Eight cells per row: province, region code, region name, unemployment
//!   rate, insured hours required, min weeks payable, max weeks payable, best
//!   weeks required.
//! - All qualifying rows are walked and the last one wins.

pub mod postal;
pub mod region;
pub mod table;

pub use postal::extract_postal;
pub use region::extract_region;
pub use table::{Cell, Link, data_rows};
