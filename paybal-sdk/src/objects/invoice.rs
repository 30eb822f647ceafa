use serde::{Deserialize, Serialize};

/// `POST /admin/api/{version}/orders/{id}/invoice.json` request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceRequest {
    pub invoice: Invoice,
}

/// Invoice email options. Unset fields fall back to the store defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
}

impl InvoiceRequest {
    pub fn to(recipient: Option<String>) -> Self {
        Self {
            invoice: Invoice {
                to: recipient,
                ..Invoice::default()
            },
        }
    }
}
