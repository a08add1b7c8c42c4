//! Beatmap catalog client.
//!
//! Implements [`beatfetch_core::CatalogPort`] over HTTP. The client is
//! generic over a small [`HttpBackend`](http) seam so that parsing and error
//! mapping can be tested without a network.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultCatalogClient is meant to be used through the CatalogPort trait,
// not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod parsing;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultCatalogClient;

// Configuration
pub use config::CatalogClientConfig;

// Errors
pub use error::CatalogClientError;
