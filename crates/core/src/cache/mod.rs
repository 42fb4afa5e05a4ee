//! SQLite-backed cache for postal code and economic region lookups.
//!
//! This module provides a persistent cache using SQLite with async access via
//! tokio-rusqlite. It supports:
//!
//! - Two independent keyed tables with upsert semantics
//! - Automatic schema migrations
//! - WAL mode for concurrent access

pub mod connection;
pub mod migrations;
pub mod postal;
pub mod region;
pub mod store;

pub use crate::Error;

pub use connection::CacheDb;
pub use postal::PostalRecord;
pub use region::RegionRecord;
pub use store::RecordStore;
