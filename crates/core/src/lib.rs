//! Core types and shared functionality for eiregion.
//!
//! This crate provides:
//! - Cache implementation with SQLite backend
//! - Freshness policy and the postal/region resolver
//! - The remote source abstraction the resolver fetches through
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod freshness;
pub mod resolver;
pub mod source;

pub use cache::{CacheDb, PostalRecord, RecordStore, RegionRecord};
pub use config::{AppConfig, ConfigError, Transport};
pub use error::{Error, ErrorKind};
pub use freshness::{FreshnessPolicy, STALE_AFTER_DAYS, is_stale};
pub use resolver::{CachedPostal, PostalResult, RegionResult, Resolver, normalize_postal_code};
pub use source::{PostalFields, RegionFields, RemoteSource};
