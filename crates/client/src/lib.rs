//! Remote source client for eiregion.
//!
//! This crate fetches the EI economic region site's postal search and region
//! pages and reads their table rows into the field structs the resolver
//! stores.

pub mod extract;
pub mod fetch;
pub mod source;

pub use extract::{Cell, Link, data_rows, extract_postal, extract_region};
pub use fetch::{FetchClient, FetchConfig, FetchResponse, UrlError};
pub use source::EiRegionSite;
