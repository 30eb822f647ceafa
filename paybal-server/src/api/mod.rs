//! Order balance lookup handlers.
//!
//! One handler serves every path in the routing table. Per request it:
//!
//! 1. checks the app proxy signature, if the route asks for it
//! 2. normalizes `order_id` (missing or malformed → 400, nothing sent upstream)
//! 3. fetches the order through the configured upstream
//! 4. answers with JSON or a page, depending on the route kind

pub mod inject_script;
pub mod pages;
pub mod routing;

use axum::{
    Extension, Json,
    extract::{Query, RawQuery, State, rejection::QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use kanau::processor::Processor;
use paybal_core::balance::{BalanceState, OrderBalance};
use paybal_core::processors::{FetchOrderBalance, SendOrderInvoice};
use paybal_sdk::client::ClientError;
use paybal_sdk::identifier::{IdentifierError, OrderId};
use paybal_sdk::objects::OrderPaymentStatus;
use paybal_sdk::signature::{self, SignatureError};
use serde::Deserialize;
use serde_json::json;

use crate::api::pages::DueNotice;
use crate::api::routing::{RouteBehavior, RouteKind};
use crate::state::AppState;

/// Query string of a lookup request. `orderId` is accepted as an alias.
#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    order_id: Option<String>,
    #[serde(rename = "orderId")]
    order_id_camel: Option<String>,
}

impl OrderQuery {
    fn order_id(&self) -> Result<OrderId, ApiError> {
        let raw = present(&self.order_id)
            .or(present(&self.order_id_camel))
            .ok_or(ApiError::MissingOrderId)?;
        OrderId::parse(raw).map_err(|e| match e {
            IdentifierError::Empty => ApiError::MissingOrderId,
            IdentifierError::Malformed(_) => ApiError::InvalidOrderId,
        })
    }
}

/// A blank value counts as absent, so `?order_id=&orderId=1` falls through to the alias.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// `GET <route>?order_id=<id>` — the shared lookup handler.
pub async fn order_lookup(
    State(state): State<AppState>,
    Extension(behavior): Extension<RouteBehavior>,
    RawQuery(raw_query): RawQuery,
    query: Result<Query<OrderQuery>, QueryRejection>,
) -> Response {
    let query = query.map(|Query(q)| q).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unparseable lookup query");
        ApiError::InvalidOrderId
    });
    match lookup(&state, behavior, raw_query.as_deref(), query).await {
        Ok(response) => response,
        Err(e) => e.render(behavior.kind),
    }
}

async fn lookup(
    state: &AppState,
    behavior: RouteBehavior,
    raw_query: Option<&str>,
    query: Result<OrderQuery, ApiError>,
) -> Result<Response, ApiError> {
    if behavior.verify_proxy_signature {
        if let Some(proxy) = &state.app_proxy {
            signature::verify_query(raw_query.unwrap_or_default(), proxy.secret_bytes())
                .map_err(ApiError::Signature)?;
        }
    }

    let order_id = query?.order_id()?;

    let balance = state
        .processor
        .process(FetchOrderBalance {
            order_id,
            source: behavior.source,
        })
        .await?
        .ok_or(ApiError::OrderNotFound)?;

    match behavior.kind {
        RouteKind::StatusJson => Ok(Json(to_response(&balance)).into_response()),
        RouteKind::PayPage => pay_page(state, behavior, &balance).await,
    }
}

async fn pay_page(
    state: &AppState,
    behavior: RouteBehavior,
    balance: &OrderBalance,
) -> Result<Response, ApiError> {
    let page = match balance.state {
        BalanceState::Cancelled => pages::cancelled(balance),
        BalanceState::Paid => pages::fully_paid(balance),
        BalanceState::Due(due) => {
            let notice = if let Some(url) = balance.invoice_url.as_deref() {
                tracing::info!(order = %balance.order_name, "Linking to existing payment page");
                DueNotice::PaymentLink(url)
            } else if behavior.send_invoice {
                state
                    .processor
                    .process(SendOrderInvoice {
                        order_id: balance.order_id.clone(),
                        recipient: None,
                    })
                    .await
                    .map_err(ApiError::Invoice)?;
                DueNotice::InvoiceSent {
                    email: balance.email.as_deref(),
                }
            } else {
                DueNotice::NoLinkYet
            };
            pages::balance_due(balance, due, notice)
        }
    };
    Ok(Html(page).into_response())
}

/// Convert an `OrderBalance` (domain model) into an `OrderPaymentStatus` (API model).
fn to_response(balance: &OrderBalance) -> OrderPaymentStatus {
    OrderPaymentStatus {
        order_id: balance.order_id.to_string(),
        order_name: balance.order_name.clone(),
        financial_status: balance.financial_status,
        cancelled: balance.is_cancelled(),
        total_price: balance.total_price,
        remaining_balance: balance.remaining_balance(),
        has_outstanding_balance: balance.has_outstanding_balance(),
        email: balance.email.clone(),
        invoice_url: balance.invoice_url.clone(),
    }
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in lookup handlers.
#[derive(Debug)]
enum ApiError {
    /// No `order_id` (or `orderId`) in the query.
    MissingOrderId,
    /// `order_id` holds no numeric order id.
    InvalidOrderId,
    /// The app proxy signature did not check out.
    Signature(SignatureError),
    /// The upstream answered 2xx without an order.
    OrderNotFound,
    /// Any failure fetching the order from the Admin API.
    Upstream(ClientError),
    /// The order was found but the invoice could not be sent.
    Invoice(ClientError),
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        Self::Upstream(err)
    }
}

impl ApiError {
    /// Render for the route kind: plain text for pages, JSON for the API.
    fn render(self, kind: RouteKind) -> Response {
        let (status, message) = match self {
            ApiError::MissingOrderId => (StatusCode::BAD_REQUEST, "Missing order_id".to_owned()),
            ApiError::InvalidOrderId => (StatusCode::BAD_REQUEST, "Invalid order_id".to_owned()),
            ApiError::Signature(e) => {
                tracing::warn!(error = %e, "Rejected app proxy request");
                (
                    StatusCode::UNAUTHORIZED,
                    "Invalid app proxy signature".to_owned(),
                )
            }
            ApiError::OrderNotFound => (StatusCode::NOT_FOUND, "Order not found.".to_owned()),
            ApiError::Upstream(e) => upstream_failure(e, "Error fetching order"),
            ApiError::Invoice(e) => upstream_failure(e, "Error sending invoice"),
        };

        match kind {
            RouteKind::StatusJson => (status, Json(json!({ "error": message }))).into_response(),
            RouteKind::PayPage => {
                let mut response = (status, message).into_response();
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; charset=utf-8"),
                );
                response
            }
        }
    }
}

/// Status and message for an Admin API failure. Upstream HTTP errors keep
/// their status; transport and decode failures become a bare 500.
fn upstream_failure(err: ClientError, context: &str) -> (StatusCode, String) {
    match err {
        ClientError::Api { status, body } => {
            tracing::warn!(%status, context, "Admin API returned an error");
            let status =
                StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, format!("{context}: {body}"))
        }
        ClientError::GraphQl(errors) => {
            tracing::error!(errors = ?errors, context, "Admin API GraphQL errors");
            (
                StatusCode::BAD_GATEWAY,
                format!("{context}: {}", errors.join("; ")),
            )
        }
        e => {
            tracing::error!(error = %e, context, "Admin API request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_owned(),
            )
        }
    }
}

#[cfg(test)]
mod tests;
