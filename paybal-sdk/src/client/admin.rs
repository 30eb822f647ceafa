//! Admin API client (proxy → store).
//!
//! Every request carries the static access token in
//! [`ACCESS_TOKEN_HEADER`]. Each call is one best-effort request: no retries
//! and no timeout beyond what the `reqwest::Client` was built with.

use reqwest::Client;
use serde::Serialize;
use serde_json::json;

use super::ClientError;
use crate::config::AdminApiConfig;
use crate::identifier::OrderId;
use crate::objects::order::ORDER_BALANCE_QUERY;
use crate::objects::{
    GraphQlOrder, GraphQlRequest, GraphQlResponse, InvoiceRequest, OrderBalanceData, RestOrder,
    RestOrderEnvelope,
};

/// Header carrying the Admin API access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Typed HTTP client for one store's **Admin API**.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: Client,
    config: AdminApiConfig,
}

impl AdminClient {
    /// Create a new `AdminClient` from explicit configuration.
    pub fn new(config: AdminApiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /admin/api/{version}/orders/{id}.json` – fetch one order.
    ///
    /// Returns `Ok(None)` when the upstream answers 2xx without an `order`.
    pub async fn get_order(&self, order_id: &OrderId) -> Result<Option<RestOrder>, ClientError> {
        let url = self.config.endpoint(&format!(
            "orders/{}.json",
            urlencoding::encode(order_id.as_str())
        ))?;

        let resp = self
            .http
            .get(url)
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let envelope: RestOrderEnvelope = parse_response(resp).await?;
        Ok(envelope.order)
    }

    /// `POST /admin/api/{version}/orders/{id}/invoice.json` – email an
    /// invoice for the order.
    ///
    /// Not idempotent: every call sends another email.
    pub async fn send_invoice(
        &self,
        order_id: &OrderId,
        invoice: &InvoiceRequest,
    ) -> Result<(), ClientError> {
        let url = self.config.endpoint(&format!(
            "orders/{}/invoice.json",
            urlencoding::encode(order_id.as_str())
        ))?;

        let resp = self
            .http
            .post(url)
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .json(invoice)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, body });
        }
        Ok(())
    }

    /// `POST /admin/api/{version}/graphql.json` – fetch the balance fields of
    /// one order by global id.
    pub async fn order_balance(
        &self,
        order_id: &OrderId,
    ) -> Result<Option<GraphQlOrder>, ClientError> {
        let data: Option<OrderBalanceData> = self
            .graphql(ORDER_BALANCE_QUERY, json!({ "id": order_id.to_gid() }))
            .await?;
        Ok(data.and_then(|d| d.order))
    }

    async fn graphql<V, T>(&self, query: &str, variables: V) -> Result<Option<T>, ClientError>
    where
        V: Serialize,
        T: serde::de::DeserializeOwned,
    {
        let url = self.config.endpoint("graphql.json")?;

        let resp = self
            .http
            .post(url)
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let response: GraphQlResponse<T> = parse_response(resp).await?;
        response.into_result().map_err(ClientError::GraphQl)
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
