mod envelope;
mod order;
mod transaction;

pub use envelope::{
    CustomerDetails, EventData, OrderInfo, OrderTags, PaymentInfo, TestObject, WebhookEnvelope,
    WebhookReply,
};
pub use order::OrderRecord;
pub use transaction::{CustomerInfo, NewTransaction, TransactionRecord};
