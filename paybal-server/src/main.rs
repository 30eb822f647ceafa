//! Pay Balance Server
//!
//! Answers "what does this customer still owe on this order?" by asking the
//! store's Admin API, for storefront buttons and programmatic callers.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::{ConfigLoader, ConfigOverrides};
use paybal_core::processors::AdminApiProcessor;
use paybal_sdk::client::AdminClient;
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Pay Balance - order balance proxy for the storefront
#[derive(Parser, Debug)]
#[command(name = "paybal-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (optional)
    #[arg(short, long, default_value = "./paybal-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Listen on 0.0.0.0 with this port
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Store domain (e.g., example.myshopify.com)
    #[arg(long, env = "SHOPIFY_SHOP_DOMAIN")]
    shop_domain: Option<String>,

    /// Admin API access token
    #[arg(long, env = "SHOPIFY_ADMIN_API_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// App proxy shared secret
    #[arg(long, env = "SHOPIFY_APP_SECRET", hide_env_values = true)]
    app_secret: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting paybal-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = ConfigLoader::new(
        &args.config,
        ConfigOverrides {
            listen: args.listen,
            port: args.port,
            shop_domain: args.shop_domain,
            access_token: args.access_token,
            app_secret: args.app_secret,
        },
    );
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    tracing::info!(
        shop = %loaded_config.admin_api.base_url,
        api_version = %loaded_config.admin_api.api_version,
        routes = loaded_config.routes.len(),
        "Configuration loaded"
    );

    let proxy_checked = loaded_config
        .routes
        .iter()
        .any(|r| r.behavior.verify_proxy_signature);
    if proxy_checked && loaded_config.app_proxy.is_none() {
        tracing::warn!("No app secret configured, app proxy signatures will not be checked");
    }

    // Create application state
    let processor = AdminApiProcessor::new(AdminClient::new(loaded_config.admin_api));
    let state = AppState::new(processor, loaded_config.app_proxy);

    // Build the router
    let router = build_router(state, &loaded_config.routes);

    // Run the server
    tracing::info!("Starting HTTP server on {}", loaded_config.listen);
    let result = run_server(router, loaded_config.listen).await;
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
