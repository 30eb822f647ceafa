//! Storefront injector script.
//!
//! Loaded by the theme on customer account pages. On orders whose page
//! mentions invoice / net terms wording it hides "Buy again" and adds a
//! "Pay Remaining Balance" link to the app proxy route.

use axum::{http::header, response::IntoResponse};

const INJECT_SCRIPT: &str = include_str!("../../assets/inject-script.js");

/// `GET /inject-script.js`
pub async fn inject_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        INJECT_SCRIPT,
    )
}
