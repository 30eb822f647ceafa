//! TOML file configuration structures.
//!
//! These structs directly map to the `paybal-config.toml` file format.
//! Every section is optional; environment variables can supply the shop
//! credentials instead.

use crate::api::routing::Route;
use paybal_sdk::config::DEFAULT_API_VERSION;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub shop: ShopConfig,
    /// Replaces the default routing table when non-empty.
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:3000").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

pub(crate) fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

/// Store access section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// The `*.myshopify.com` domain of the store.
    #[serde(default)]
    pub domain: String,
    /// Admin API access token. Usually left out of the file and supplied
    /// through `SHOPIFY_ADMIN_API_TOKEN`.
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// App proxy shared secret.
    #[serde(default)]
    pub app_secret: Option<String>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            access_token: None,
            api_version: default_api_version(),
            app_secret: None,
        }
    }
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_owned()
}
