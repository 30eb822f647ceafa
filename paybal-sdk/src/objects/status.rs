//! JSON body of the order payment status endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FinancialStatus;

/// Balance status of one order as returned to programmatic callers.
///
/// Money fields are JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPaymentStatus {
    pub order_id: String,
    pub order_name: String,
    pub financial_status: FinancialStatus,
    pub cancelled: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining_balance: Decimal,
    pub has_outstanding_balance: bool,
    pub email: Option<String>,
    pub invoice_url: Option<String>,
}
