//! Shared types for the pay-balance proxy.
//!
//! Holds the Admin API payload shapes, the outbound JSON objects, the
//! order identifier normalizer, and app proxy signature checks. The typed
//! Admin API client lives behind the `client` feature.

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod identifier;
pub mod objects;
pub mod signature;
