//! Upstream operations.
//!
//! Each operation is a small command struct handled by
//! [`AdminApiProcessor`] through [`kanau::processor::Processor`]:
//!
//! - [`FetchOrderBalance`] — one lookup, REST or GraphQL, no side effects
//! - [`SendOrderInvoice`] — one invoice email; **not** idempotent

mod fetch_balance;
mod send_invoice;

pub use fetch_balance::FetchOrderBalance;
pub use send_invoice::SendOrderInvoice;

use paybal_sdk::client::AdminClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which Admin API flavor a lookup goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamSource {
    #[default]
    Rest,
    #[serde(rename = "graphql")]
    GraphQl,
}

/// Runs upstream operations against one store.
///
/// Cheap to clone; the client is shared.
#[derive(Debug, Clone)]
pub struct AdminApiProcessor {
    pub client: Arc<AdminClient>,
}

impl AdminApiProcessor {
    pub fn new(client: AdminClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}
