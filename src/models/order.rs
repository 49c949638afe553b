use serde::{Deserialize, Serialize};

/// Order document shared with the ordering app, which normally creates it
/// before payment lands. The webhook handler only touches the payment fields,
/// except for the synthetic test order which it creates whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    /// "paid" once a SUCCESS payment lands; otherwise whatever the ordering
    /// app last wrote.
    pub status: Option<String>,
    /// Raw gateway payment status, always overwritten on delivery.
    pub payment_status: Option<String>,
    pub created_on: Option<i64>,
    pub user_id: Option<String>,
    pub amount: Option<f64>,
    /// Menu selection as JSON text; opaque to this service.
    pub general_menu: Option<String>,
    pub extra_menu: Option<String>,
    pub payment_confirmed_on: Option<i64>,
}
