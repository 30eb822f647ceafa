//! The lookup routing table.
//!
//! Every lookup path is served by the same handler; a [`RouteBehavior`]
//! attached to the route decides what it fetches and how it answers.

use paybal_core::processors::UpstreamSource;
use serde::{Deserialize, Serialize};

/// What a lookup route answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// `application/json` balance status for programmatic callers.
    StatusJson,
    /// `text/html` page for a customer's browser.
    PayPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteBehavior {
    pub kind: RouteKind,
    #[serde(default)]
    pub source: UpstreamSource,
    /// Email an invoice when a balance is due and no payment link exists.
    #[serde(default)]
    pub send_invoice: bool,
    /// Require a valid app proxy signature (when a secret is configured).
    #[serde(default)]
    pub verify_proxy_signature: bool,
}

/// One entry of the routing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,
    #[serde(flatten)]
    pub behavior: RouteBehavior,
}

impl Route {
    fn new(path: &str, behavior: RouteBehavior) -> Self {
        Self {
            path: path.to_owned(),
            behavior,
        }
    }
}

/// Paths owned by the server itself; lookup routes may not claim them.
pub const RESERVED_PATHS: [&str; 2] = ["/health", "/inject-script.js"];

/// The table used when the config file declares no `[[routes]]`.
pub fn default_routes() -> Vec<Route> {
    let page = RouteBehavior {
        kind: RouteKind::PayPage,
        source: UpstreamSource::Rest,
        send_invoice: false,
        verify_proxy_signature: false,
    };
    vec![
        Route::new("/", page),
        Route::new("/pay-balance", page),
        Route::new(
            "/apps/pay-balance",
            RouteBehavior {
                send_invoice: true,
                verify_proxy_signature: true,
                ..page
            },
        ),
        Route::new(
            "/api/order-payment-status",
            RouteBehavior {
                kind: RouteKind::StatusJson,
                source: UpstreamSource::Rest,
                send_invoice: false,
                verify_proxy_signature: false,
            },
        ),
    ]
}
