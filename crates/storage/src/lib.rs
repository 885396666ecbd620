//! Storage layer for capstore
//!
//! This crate implements the payload store on top of redb:
//! - `Cache`: the capability interface callers program against
//! - `RedbCache`: one bucket of a redb database behind that interface
//! - `open_database` / `get_db`: opening the database file
//! - `StoreConfig`: file, bucket and engine settings from `capstore.toml`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod database;
pub mod redb_cache;

pub use cache::Cache;
pub use config::{StoreConfig, CONFIG_FILE_NAME, DEFAULT_DATABASE_PATH, REQUESTS_BUCKET_NAME};
pub use database::{get_db, in_memory_database, open_database};
pub use redb_cache::RedbCache;
