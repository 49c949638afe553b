use serde::{Deserialize, Serialize};

/// Write-once record of a single payment attempt, keyed by the gateway's
/// payment id. Never updated or deleted by the webhook handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub order_id: String,
    pub status: String,
    /// Bank reference (UTR) when the gateway provides one.
    pub reference: Option<String>,
    pub amount: f64,
    pub customer: CustomerInfo,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Data required to record a new transaction. `created_at` is stamped at
/// write time.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub transaction_id: String,
    pub order_id: String,
    pub status: String,
    pub reference: Option<String>,
    pub amount: f64,
    pub customer: CustomerInfo,
}
