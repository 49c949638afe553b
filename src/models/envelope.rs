use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level payload delivered by the payment gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEnvelope {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub data: Option<EventData>,
}

/// Event-specific payload. Every level is optional: the gateway's test-mode
/// deliveries omit arbitrary parts of the structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventData {
    pub test_object: Option<TestObject>,
    pub order: Option<OrderInfo>,
    pub payment: Option<PaymentInfo>,
    pub customer_details: Option<CustomerDetails>,
}

/// Marker object the gateway sends on webhook registration pings.
#[derive(Debug, Clone, Deserialize)]
pub struct TestObject {
    pub test_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderInfo {
    /// String or number depending on the gateway; stringified on extraction.
    pub order_id: Option<Value>,
    /// Number or numeric string.
    pub order_amount: Option<Value>,
    pub order_tags: Option<OrderTags>,
}

/// Payment links carry the real order id in `link_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderTags {
    pub link_id: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentInfo {
    pub cf_payment_id: Option<Value>,
    pub payment_status: Option<String>,
    pub bank_reference: Option<String>,
    pub payment_amount: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerDetails {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
}

/// JSON body returned to the gateway for every webhook outcome.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookReply {
    pub success: bool,
    pub message: &'static str,
}

impl WebhookReply {
    pub fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }

    pub fn failure(message: &'static str) -> Self {
        Self {
            success: false,
            message,
        }
    }
}
