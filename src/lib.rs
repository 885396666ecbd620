//! capstore - embedded store for captured request/response payloads
//!
//! Payloads are kept in one bucket of a redb database file. The [`Cache`]
//! trait is the interface callers use; [`RedbCache`] implements it.
//!
//! # Quick Start
//!
//! ```ignore
//! use capstore::{get_db, Cache, Payload, RedbCache};
//! use std::sync::Arc;
//!
//! let cache = RedbCache::with_default_bucket(Arc::new(get_db("requests.db")));
//!
//! let payload = Payload::new(request, response);
//! cache.set(&payload.key(), &payload.encode()?)?;
//!
//! for recorded in cache.get_all_requests()? {
//!     println!("{} {}", recorded.request.method, recorded.request.path);
//! }
//! cache.close_db();
//! ```

pub use capstore_core::*;
pub use capstore_storage::*;
