//! Balance assessment.
//!
//! The Admin API exposes several overlapping money fields. The canonical
//! source for the amount still owed is the explicit outstanding total
//! (`total_outstanding` on REST, `totalOutstandingSet` on GraphQL). Only
//! when that is absent do we fall back to `total_price - amount paid`.
//! `total_due` is never consulted.
//!
//! Evaluation order:
//! 1. a cancellation timestamp means cancelled, nothing owed
//! 2. financial status `paid` means nothing owed
//! 3. an explicit outstanding amount `<= 0` means nothing owed
//! 4. otherwise whatever price minus paid leaves, clamped at zero

use paybal_sdk::identifier::OrderId;
use paybal_sdk::objects::{FinancialStatus, GraphQlOrder, RestOrder};
use rust_decimal::Decimal;

/// Substrings that mark an upstream URL as an actual payment page.
const PAYMENT_LINK_MARKERS: [&str; 2] = ["checkout", "payments"];

/// Where an order stands with respect to payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceState {
    Cancelled,
    Paid,
    /// Positive amount still owed.
    Due(Decimal),
}

impl BalanceState {
    /// Always `>= 0`; zero for cancelled and paid orders.
    pub fn remaining(self) -> Decimal {
        match self {
            BalanceState::Due(amount) => amount,
            BalanceState::Cancelled | BalanceState::Paid => Decimal::ZERO,
        }
    }

    pub fn is_due(self) -> bool {
        matches!(self, BalanceState::Due(_))
    }
}

/// The raw inputs of an assessment, independent of which API produced them.
#[derive(Debug, Clone, Default)]
pub struct BalanceFacts {
    pub cancelled: bool,
    pub financial_status: Option<FinancialStatus>,
    pub total_price: Option<Decimal>,
    pub outstanding: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
}

impl BalanceFacts {
    pub fn assess(&self) -> BalanceState {
        if self.cancelled {
            return BalanceState::Cancelled;
        }
        if self.financial_status == Some(FinancialStatus::Paid) {
            return BalanceState::Paid;
        }
        let remaining = match self.outstanding {
            Some(outstanding) => outstanding,
            None => {
                self.total_price.unwrap_or_default() - self.amount_paid.unwrap_or_default()
            }
        };
        if remaining <= Decimal::ZERO {
            BalanceState::Paid
        } else {
            BalanceState::Due(remaining)
        }
    }
}

/// Balance status of a single order, derived entirely from one upstream
/// response.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBalance {
    pub order_id: OrderId,
    pub order_name: String,
    pub financial_status: FinancialStatus,
    pub total_price: Decimal,
    /// ISO 4217 code of the order's shop currency, when the upstream sent one.
    pub currency: Option<String>,
    pub state: BalanceState,
    pub email: Option<String>,
    /// A link the customer can pay through, when the upstream has one.
    pub invoice_url: Option<String>,
}

impl OrderBalance {
    pub fn from_rest(order_id: OrderId, order: RestOrder) -> Self {
        let facts = BalanceFacts {
            cancelled: order.cancelled_at.is_some(),
            financial_status: order.financial_status,
            total_price: order.total_price,
            outstanding: order.total_outstanding,
            amount_paid: order.total_paid_amount,
        };
        let link = order.invoice_url.or(order.order_status_url);
        Self {
            order_id,
            order_name: order.name,
            financial_status: order.financial_status.unwrap_or(FinancialStatus::Unknown),
            total_price: order.total_price.unwrap_or_default(),
            currency: non_empty(order.currency),
            state: facts.assess(),
            email: non_empty(order.email),
            invoice_url: link.filter(|url| is_payment_link(url)),
        }
    }

    pub fn from_graphql(order_id: OrderId, order: GraphQlOrder) -> Self {
        let total_price = order.total_price_set.as_ref().map(|m| m.amount());
        let facts = BalanceFacts {
            cancelled: order.cancelled_at.is_some(),
            financial_status: order.display_financial_status,
            total_price,
            outstanding: order.total_outstanding_set.as_ref().map(|m| m.amount()),
            amount_paid: order.total_received_set.as_ref().map(|m| m.amount()),
        };
        Self {
            order_id,
            order_name: order.name,
            financial_status: order
                .display_financial_status
                .unwrap_or(FinancialStatus::Unknown),
            total_price: total_price.unwrap_or_default(),
            currency: non_empty(
                order
                    .total_price_set
                    .and_then(|m| m.shop_money.currency_code),
            ),
            state: facts.assess(),
            email: non_empty(order.email),
            invoice_url: order.status_page_url.filter(|url| is_payment_link(url)),
        }
    }

    pub fn remaining_balance(&self) -> Decimal {
        self.state.remaining()
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == BalanceState::Cancelled
    }

    pub fn has_outstanding_balance(&self) -> bool {
        self.state.is_due()
    }
}

/// Whether `url` points at a checkout or payment page.
pub fn is_payment_link(url: &str) -> bool {
    PAYMENT_LINK_MARKERS.iter().any(|marker| url.contains(marker))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
