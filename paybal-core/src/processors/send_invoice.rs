use kanau::processor::Processor;
use paybal_sdk::client::ClientError;
use paybal_sdk::identifier::OrderId;
use paybal_sdk::objects::InvoiceRequest;

use super::AdminApiProcessor;

/// Email an invoice for an order.
///
/// Every call triggers another email upstream; there is no dedup guard.
#[derive(Debug, Clone)]
pub struct SendOrderInvoice {
    pub order_id: OrderId,
    /// Recipient override; the store's default recipient when `None`.
    pub recipient: Option<String>,
}

impl Processor<SendOrderInvoice> for AdminApiProcessor {
    type Output = ();
    type Error = ClientError;
    #[tracing::instrument(skip_all, err, name = "AdminApi:SendOrderInvoice", fields(order_id = %command.order_id))]
    async fn process(&self, command: SendOrderInvoice) -> Result<(), ClientError> {
        self.client
            .send_invoice(&command.order_id, &InvoiceRequest::to(command.recipient))
            .await?;
        tracing::info!(order_id = %command.order_id, "Invoice sent");
        Ok(())
    }
}
