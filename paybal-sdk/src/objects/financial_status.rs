use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Payment progress of an order as reported by the Admin API.
///
/// REST spells values in snake case (`partially_paid`), GraphQL in screaming
/// snake case (`PARTIALLY_PAID`). Both parse to the same variant. Values we
/// do not know yet land in [`FinancialStatus::Unknown`] instead of failing
/// the whole lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinancialStatus {
    Pending,
    Authorized,
    PartiallyPaid,
    Paid,
    PartiallyRefunded,
    Refunded,
    Voided,
    Expired,
    Unpaid,
    Unknown,
}

impl FinancialStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            FinancialStatus::Pending => "pending",
            FinancialStatus::Authorized => "authorized",
            FinancialStatus::PartiallyPaid => "partially_paid",
            FinancialStatus::Paid => "paid",
            FinancialStatus::PartiallyRefunded => "partially_refunded",
            FinancialStatus::Refunded => "refunded",
            FinancialStatus::Voided => "voided",
            FinancialStatus::Expired => "expired",
            FinancialStatus::Unpaid => "unpaid",
            FinancialStatus::Unknown => "unknown",
        }
    }
}

impl FromStr for FinancialStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s.trim().to_ascii_lowercase().as_str() {
            "pending" => FinancialStatus::Pending,
            "authorized" => FinancialStatus::Authorized,
            "partially_paid" => FinancialStatus::PartiallyPaid,
            "paid" => FinancialStatus::Paid,
            "partially_refunded" => FinancialStatus::PartiallyRefunded,
            "refunded" => FinancialStatus::Refunded,
            "voided" => FinancialStatus::Voided,
            "expired" => FinancialStatus::Expired,
            "unpaid" => FinancialStatus::Unpaid,
            _ => FinancialStatus::Unknown,
        };
        Ok(status)
    }
}

impl fmt::Display for FinancialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FinancialStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FinancialStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let Ok(status) = raw.parse::<FinancialStatus>();
        Ok(status)
    }
}
