//! Application state shared across all request handlers.

use paybal_core::processors::AdminApiProcessor;
use paybal_sdk::config::AppProxyConfig;
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// Nothing in here changes after startup; requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Runs lookups and invoice sends against the Admin API.
    pub processor: AdminApiProcessor,
    /// App proxy secret, when signature checks are enabled.
    pub app_proxy: Option<Arc<AppProxyConfig>>,
}

impl AppState {
    pub fn new(processor: AdminApiProcessor, app_proxy: Option<AppProxyConfig>) -> Self {
        Self {
            processor,
            app_proxy: app_proxy.map(Arc::new),
        }
    }
}
