//! Runtime configuration types shared between crates.
//!
//! These are the validated values the server builds at startup; loading and
//! parsing of the config file happens in the server crate.

mod app_proxy;
mod shop;

pub use app_proxy::AppProxyConfig;
pub use shop::{AdminApiConfig, DEFAULT_API_VERSION};
