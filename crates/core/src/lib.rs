//! Core types for capstore
//!
//! This crate defines the foundational types shared by the storage layer
//! and the CLI:
//! - `Payload`: a captured request/response pair and its codec
//! - `CacheError`: the closed error taxonomy of the store

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod payload;

pub use error::{CacheError, Result};
pub use payload::{decode_payload, Headers, Payload, RequestDetails, ResponseDetails};
