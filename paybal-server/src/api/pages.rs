//! Server-rendered customer pages.
//!
//! Plain `format!` rendering. Every value that came from the upstream goes
//! through [`escape_html`] first.

use paybal_core::balance::OrderBalance;
use rust_decimal::Decimal;

const BODY_STYLE: &str = "font-family: Georgia, 'Times New Roman', serif; \
background-color: #D2C2A7; color: #1C1C1C; text-align: center; margin-top: 96px;";

const BUTTON_STYLE: &str = "display:inline-block; border:1px solid #1C1C1C; \
padding:10px 18px; border-radius:6px; text-decoration:none; color:#1C1C1C; \
margin-top:16px; font-weight:600;";

const PAY_BUTTON_STYLE: &str = "display:inline-block; background-color:#0A213E; \
color:#fff; padding:10px 20px; border-radius:6px; text-decoration:none; \
font-weight:600; margin-bottom:16px;";

/// What to tell the customer under the outstanding amount.
#[derive(Debug, Clone, Copy)]
pub enum DueNotice<'a> {
    /// The upstream has a payment page for this order.
    PaymentLink(&'a str),
    /// An invoice email was just sent.
    InvoiceSent { email: Option<&'a str> },
    /// Nothing to link to yet.
    NoLinkYet,
}

pub fn cancelled(balance: &OrderBalance) -> String {
    layout(&format!(
        r#"<h2 style="letter-spacing:1px;">Order {name}</h2>
    <p>This order has been canceled — no balance due.</p>
    {back}"#,
        name = escape_html(&balance.order_name),
        back = back_to_orders(),
    ))
}

pub fn fully_paid(balance: &OrderBalance) -> String {
    layout(&format!(
        r#"<h2 style="letter-spacing:1px;">Order {name}</h2>
    <p>This order is fully paid — no balance due.</p>
    {back}"#,
        name = escape_html(&balance.order_name),
        back = back_to_orders(),
    ))
}

pub fn balance_due(balance: &OrderBalance, due: Decimal, notice: DueNotice<'_>) -> String {
    let notice = match notice {
        DueNotice::PaymentLink(url) => format!(
            r#"<p><a href="{url}" style="{PAY_BUTTON_STYLE}">Pay Now</a></p>"#,
            url = escape_html(url),
        ),
        DueNotice::InvoiceSent { email: Some(email) } => format!(
            r#"<p style="max-width:480px;margin:0 auto 24px;">
      An invoice with a payment link has been sent to <strong>{email}</strong>.
      Please check your email to complete payment.
    </p>"#,
            email = escape_html(email),
        ),
        DueNotice::InvoiceSent { email: None } => r#"<p style="max-width:480px;margin:0 auto 24px;">
      An invoice with a payment link has been sent to the email on this order.
      Please check your email to complete payment.
    </p>"#
            .to_owned(),
        DueNotice::NoLinkYet => r#"<p style="max-width:480px;margin:0 auto 24px;">
      A payment link for this order hasn’t been generated yet.
      Please check your email or contact us for assistance.
    </p>"#
            .to_owned(),
    };

    layout(&format!(
        r#"<h2 style="letter-spacing:1px;">Pay Remaining Balance for {name}</h2>
    <p style="font-size:18px;margin-bottom:30px;">
      Outstanding: <strong>{due}</strong>
    </p>
    {notice}
    {back}"#,
        name = escape_html(&balance.order_name),
        due = escape_html(&format_amount(due, balance.currency.as_deref())),
        back = back_to_orders(),
    ))
}

fn layout(inner: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head><meta charset="utf-8"><title>Order Balance</title></head>
  <body style="{BODY_STYLE}">
    {inner}
  </body>
</html>
"#
    )
}

fn back_to_orders() -> String {
    format!(r#"<a href="/account" style="{BUTTON_STYLE}">Back to Orders</a>"#)
}

/// `$40.00` for USD (or when the upstream sent no currency), `40.00 EUR`
/// otherwise.
pub fn format_amount(amount: Decimal, currency: Option<&str>) -> String {
    match currency {
        None => format!("${}", format_money(amount)),
        Some(code) if code.eq_ignore_ascii_case("USD") => format!("${}", format_money(amount)),
        Some(code) => format!("{} {code}", format_money(amount)),
    }
}

/// Two decimal places, rounded half away from zero.
pub fn format_money(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
