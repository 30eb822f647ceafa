use kanau::processor::Processor;
use paybal_sdk::client::ClientError;
use paybal_sdk::identifier::OrderId;

use super::{AdminApiProcessor, UpstreamSource};
use crate::balance::OrderBalance;

/// Look up one order and assess its balance.
///
/// Output is `None` when the upstream answered successfully but had no such
/// order.
#[derive(Debug, Clone)]
pub struct FetchOrderBalance {
    pub order_id: OrderId,
    pub source: UpstreamSource,
}

impl Processor<FetchOrderBalance> for AdminApiProcessor {
    type Output = Option<OrderBalance>;
    type Error = ClientError;
    #[tracing::instrument(skip_all, err, name = "AdminApi:FetchOrderBalance", fields(order_id = %query.order_id))]
    async fn process(
        &self,
        query: FetchOrderBalance,
    ) -> Result<Option<OrderBalance>, ClientError> {
        let balance = match query.source {
            UpstreamSource::Rest => self
                .client
                .get_order(&query.order_id)
                .await?
                .map(|order| OrderBalance::from_rest(query.order_id, order)),
            UpstreamSource::GraphQl => self
                .client
                .order_balance(&query.order_id)
                .await?
                .map(|order| OrderBalance::from_graphql(query.order_id, order)),
        };
        Ok(balance)
    }
}
