//! Order identifier normalization.
//!
//! Callers hand us either a bare numeric id (`5551234`) or the Admin API's
//! global id form (`gid://shopify/Order/5551234`). REST paths need the bare
//! digits, GraphQL needs the global id, so both are derived from [`OrderId`].

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref ORDER_GID: Regex = Regex::new(r"/Order/(\d+)").expect("valid order gid pattern");
    static ref PLAIN_DIGITS: Regex = Regex::new(r"^\d+$").expect("valid digits pattern");
}

/// Global id prefix for order resources.
pub const ORDER_GID_PREFIX: &str = "gid://shopify/Order/";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("order identifier is empty")]
    Empty,
    #[error("order identifier has no numeric order id: {0}")]
    Malformed(String),
}

/// Numeric order id as a digit string.
///
/// Kept as text so ids are passed through to the upstream exactly as
/// received, without any integer width assumptions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
    /// Normalize a caller-supplied identifier.
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(IdentifierError::Empty);
        }
        extract_order_digits(input)
            .map(|digits| Self(digits.to_owned()))
            .ok_or_else(|| IdentifierError::Malformed(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `gid://shopify/Order/<digits>` form used by GraphQL.
    pub fn to_gid(&self) -> String {
        format!("{ORDER_GID_PREFIX}{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the digit run following `/Order/`, or the whole input when it is
/// already a plain digit string.
pub fn extract_order_digits(input: &str) -> Option<&str> {
    if PLAIN_DIGITS.is_match(input) {
        return Some(input);
    }
    ORDER_GID
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
