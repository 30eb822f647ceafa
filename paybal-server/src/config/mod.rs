//! Configuration module for paybal-server.
//!
//! Configuration is built once at startup from an optional TOML file,
//! overridden by CLI flags and environment variables, validated, and then
//! handed to the Admin API client as an explicit value.

pub mod file;

use crate::api::routing::{RESERVED_PATHS, Route, default_routes};
use crate::config::file::FileConfig;
use paybal_sdk::config::{AdminApiConfig, AppProxyConfig};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("invalid shop domain: {0}")]
    InvalidDomain(#[from] url::ParseError),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("SHOPIFY_ADMIN_API_TOKEN not set")]
    MissingAccessToken,
}

/// Values that take precedence over the config file.
///
/// Filled from CLI flags, which clap in turn fills from the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub listen: Option<SocketAddr>,
    pub port: Option<u16>,
    pub shop_domain: Option<String>,
    pub access_token: Option<String>,
    pub app_secret: Option<String>,
}

/// Loaded configuration result containing all parts.
#[derive(Debug)]
pub struct LoadedConfig {
    pub listen: SocketAddr,
    pub admin_api: AdminApiConfig,
    pub app_proxy: Option<AppProxyConfig>,
    pub routes: Vec<Route>,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    overrides: ConfigOverrides,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, overrides: ConfigOverrides) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            overrides,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, if there is one
    /// 2. Apply CLI / environment overrides
    /// 3. Validate the configuration
    /// 4. Build the loaded configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let file_config = if self.config_path.exists() {
            let config_content = std::fs::read_to_string(&self.config_path)?;
            toml::from_str(&config_content)?
        } else {
            tracing::info!(
                "No config file at {:?}, using defaults and environment",
                self.config_path
            );
            FileConfig::default()
        };
        self.build(file_config)
    }

    fn build(&self, mut file_config: FileConfig) -> Result<LoadedConfig, ConfigError> {
        self.apply_overrides(&mut file_config);
        self.validate(&file_config)?;

        let access_token = file_config
            .shop
            .access_token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingAccessToken)?;

        let admin_api = AdminApiConfig::for_shop(
            &file_config.shop.domain,
            access_token,
            file_config.shop.api_version,
        )?;

        let app_proxy = file_config
            .shop
            .app_secret
            .filter(|s| !s.is_empty())
            .map(|s| AppProxyConfig::new(s.into_bytes()));

        let routes = if file_config.routes.is_empty() {
            default_routes()
        } else {
            file_config.routes
        };

        Ok(LoadedConfig {
            listen: file_config.server.listen,
            admin_api,
            app_proxy,
            routes,
        })
    }

    fn apply_overrides(&self, config: &mut FileConfig) {
        let o = &self.overrides;
        if let Some(port) = o.port {
            config.server.listen = SocketAddr::from(([0, 0, 0, 0], port));
        }
        if let Some(listen) = o.listen {
            config.server.listen = listen;
        }
        if let Some(domain) = &o.shop_domain {
            config.shop.domain = domain.clone();
        }
        if let Some(token) = &o.access_token {
            config.shop.access_token = Some(token.clone());
        }
        if let Some(secret) = &o.app_secret {
            config.shop.app_secret = Some(secret.clone());
        }
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.shop.domain.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "shop domain is not set".to_owned(),
            ));
        }
        if config.shop.api_version.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api_version is empty".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for route in &config.routes {
            if !route.path.starts_with('/') {
                return Err(ConfigError::ValidationError(format!(
                    "route path {:?} must start with '/'",
                    route.path
                )));
            }
            if RESERVED_PATHS.contains(&route.path.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "route path {} is reserved",
                    route.path
                )));
            }
            if !seen.insert(route.path.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "route path {} is declared twice",
                    route.path
                )));
            }
        }
        Ok(())
    }
}
