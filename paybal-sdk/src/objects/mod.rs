pub mod financial_status;
pub mod graphql;
pub mod invoice;
pub mod order;
pub mod status;

pub use financial_status::FinancialStatus;
pub use graphql::{GraphQlError, GraphQlRequest, GraphQlResponse};
pub use invoice::{Invoice, InvoiceRequest};
pub use order::{GraphQlOrder, OrderBalanceData, RestOrder, RestOrderEnvelope};
pub use status::OrderPaymentStatus;
