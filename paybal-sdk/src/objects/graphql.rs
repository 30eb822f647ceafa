//! GraphQL request / response envelopes for `graphql.json`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

/// A GraphQL response. The Admin API answers `200 OK` even when the query
/// fails, so `errors` must be checked before `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Split into data or the list of error messages.
    pub fn into_result(self) -> Result<Option<T>, Vec<String>> {
        if self.errors.is_empty() {
            Ok(self.data)
        } else {
            Err(self.errors.into_iter().map(|e| e.message).collect())
        }
    }
}
