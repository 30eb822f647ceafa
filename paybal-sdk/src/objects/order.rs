//! Order payloads returned by the Admin API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::FinancialStatus;

/// `GET /admin/api/{version}/orders/{id}.json` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestOrderEnvelope {
    #[serde(default)]
    pub order: Option<RestOrder>,
}

/// The subset of a REST order that balance checks read.
///
/// Money fields arrive as decimal strings (`"100.00"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestOrder {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub financial_status: Option<FinancialStatus>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub cancelled_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub total_price: Option<Decimal>,
    #[serde(default)]
    pub total_outstanding: Option<Decimal>,
    #[serde(default)]
    pub total_paid_amount: Option<Decimal>,
    #[serde(default)]
    pub invoice_url: Option<String>,
    #[serde(default)]
    pub order_status_url: Option<String>,
}

/// Query issued by [`crate::client::AdminClient::order_balance`].
pub const ORDER_BALANCE_QUERY: &str = r#"
query OrderBalance($id: ID!) {
  order(id: $id) {
    id
    name
    email
    displayFinancialStatus
    cancelledAt
    totalPriceSet { shopMoney { amount currencyCode } }
    totalOutstandingSet { shopMoney { amount currencyCode } }
    totalReceivedSet { shopMoney { amount currencyCode } }
    statusPageUrl
  }
}
"#;

/// `data` member of the [`ORDER_BALANCE_QUERY`] response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBalanceData {
    #[serde(default)]
    pub order: Option<GraphQlOrder>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlOrder {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_financial_status: Option<FinancialStatus>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub cancelled_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub total_price_set: Option<MoneyBag>,
    #[serde(default)]
    pub total_outstanding_set: Option<MoneyBag>,
    #[serde(default)]
    pub total_received_set: Option<MoneyBag>,
    #[serde(default)]
    pub status_page_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyBag {
    pub shop_money: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: Decimal,
    #[serde(default)]
    pub currency_code: Option<String>,
}

impl MoneyBag {
    pub fn amount(&self) -> Decimal {
        self.shop_money.amount
    }
}
