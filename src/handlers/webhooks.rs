//! Ingestion handler for payment-gateway webhook callbacks.
//!
//! The gateway delivers exactly one event type we act on
//! (`PAYMENT_SUCCESS_WEBHOOK`); everything else is either the registration
//! ping or rejected outright. Processing is two sequential store writes:
//! record the transaction once, then reconcile the order's payment fields.
//! The two writes are not wrapped in a single store transaction, so a failure
//! between them can leave the transaction recorded with the order untouched;
//! the gateway's redelivery plus the duplicate guard is the only recovery.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use rusqlite::Connection;
use serde_json::Value;

use crate::db::{queries, AppState};
use crate::error::Result;
use crate::models::{
    CustomerDetails, CustomerInfo, EventData, NewTransaction, OrderInfo, PaymentInfo,
    WebhookEnvelope, WebhookReply,
};

/// Order id the gateway uses for test-mode deliveries. Real orders are
/// created by the ordering app before payment; this one is created on the fly
/// so test deliveries still exercise the full write path.
pub const TEST_ORDER_ID: &str = "test_order_123";

const SUCCESS_STATUS: &str = "SUCCESS";

pub fn router() -> Router<AppState> {
    Router::new().route("/webhook", post(handle_payment_webhook))
}

type Reply = (StatusCode, Json<WebhookReply>);

fn reply(status: StatusCode, body: WebhookReply) -> Reply {
    (status, Json(body))
}

/// Axum handler for the gateway webhook endpoint.
pub async fn handle_payment_webhook(
    State(state): State<AppState>,
    Json(envelope): Json<WebhookEnvelope>,
) -> Result<Reply> {
    tracing::debug!("Webhook received: {:?}", envelope);

    let event_type = envelope.event_type.as_deref().unwrap_or("UNKNOWN_EVENT");

    if event_type == "WEBHOOK" && is_registration_ping(envelope.data.as_ref()) {
        tracing::info!("Test webhook registration ping received");
        return Ok(reply(
            StatusCode::OK,
            WebhookReply::ok("Test webhook registered successfully"),
        ));
    }

    if event_type != "PAYMENT_SUCCESS_WEBHOOK" {
        tracing::warn!("Unsupported event type: {}", event_type);
        return Ok(reply(
            StatusCode::BAD_REQUEST,
            WebhookReply::failure("Unsupported event type"),
        ));
    }

    // Test-mode deliveries can omit the real payment fields. Substitute the
    // whole payload, discarding any partially-present real fields.
    let data = match envelope.data {
        Some(d) if has_required_payment_fields(&d) => d,
        _ => {
            tracing::warn!("Required payment fields missing, using fallback test data");
            fallback_test_data()
        }
    };

    let payment = match extract_payment(&data) {
        Ok(p) => p,
        Err(missing) => {
            tracing::error!("Webhook payload failed validation: {}", missing.message());
            return Ok(reply(
                StatusCode::BAD_REQUEST,
                WebhookReply::failure(missing.message()),
            ));
        }
    };

    let conn = state.db.get()?;

    let record = NewTransaction {
        transaction_id: payment.transaction_id.clone(),
        order_id: payment.order_id.clone(),
        status: payment.status.clone(),
        reference: data
            .payment
            .as_ref()
            .and_then(|p| p.bank_reference.clone()),
        amount: payment.amount,
        customer: customer_from(data.customer_details.as_ref()),
    };

    if !queries::insert_transaction_if_absent(&conn, &record)? {
        tracing::info!("Duplicate transaction received: {}", payment.transaction_id);
        return Ok(reply(
            StatusCode::OK,
            WebhookReply::failure("Duplicate transaction"),
        ));
    }

    let outcome = reconcile_order(&conn, &payment)?;
    tracing::info!(
        "Webhook processed for transaction {}, order {} ({})",
        payment.transaction_id,
        payment.order_id,
        outcome.as_str()
    );

    Ok(reply(StatusCode::OK, WebhookReply::ok("Webhook handled")))
}

/// What happened to the order document for this delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OrderOutcome {
    /// Existing order had its payment fields updated in place.
    Updated,
    /// Synthetic test order created from scratch.
    Created,
    /// No order on file and not the test id. Payment can land before the
    /// ordering app creates the order, so this is tolerated, not an error.
    Skipped,
}

impl OrderOutcome {
    fn as_str(self) -> &'static str {
        match self {
            OrderOutcome::Updated => "updated",
            OrderOutcome::Created => "created",
            OrderOutcome::Skipped => "skipped",
        }
    }
}

fn reconcile_order(conn: &Connection, payment: &ExtractedPayment) -> Result<OrderOutcome> {
    if queries::update_order_payment(conn, &payment.order_id, &payment.status)? {
        return Ok(OrderOutcome::Updated);
    }
    if payment.order_id == TEST_ORDER_ID {
        queries::create_test_order(conn, &payment.order_id, payment.amount)?;
        return Ok(OrderOutcome::Created);
    }
    Ok(OrderOutcome::Skipped)
}

fn is_registration_ping(data: Option<&EventData>) -> bool {
    data.and_then(|d| d.test_object.as_ref())
        .and_then(|t| t.test_key.as_deref())
        == Some("test_value")
}

fn has_required_payment_fields(data: &EventData) -> bool {
    data.payment
        .as_ref()
        .is_some_and(|p| p.cf_payment_id.is_some() && p.payment_status.is_some())
}

/// Fixed payload substituted when a test-mode delivery omits the real
/// payment fields.
fn fallback_test_data() -> EventData {
    EventData {
        test_object: None,
        order: Some(OrderInfo {
            order_id: Some(Value::from(TEST_ORDER_ID)),
            order_amount: Some(Value::from(100)),
            order_tags: None,
        }),
        payment: Some(PaymentInfo {
            cf_payment_id: Some(Value::from("txn_test_456")),
            payment_status: Some(SUCCESS_STATUS.to_string()),
            bank_reference: Some("ref_789".to_string()),
            payment_amount: Some(Value::from(100)),
        }),
        customer_details: Some(CustomerDetails {
            customer_name: Some("Test User".to_string()),
            customer_email: Some("test@example.com".to_string()),
            customer_phone: Some("9999999999".to_string()),
        }),
    }
}

/// Validated fields pulled out of the event payload.
#[derive(Debug)]
struct ExtractedPayment {
    order_id: String,
    transaction_id: String,
    status: String,
    amount: f64,
}

/// Required field missing from the payload, with its caller-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissingField {
    OrderId,
    TransactionIdOrStatus,
}

impl MissingField {
    fn message(self) -> &'static str {
        match self {
            MissingField::OrderId => "Missing orderId",
            MissingField::TransactionIdOrStatus => "Missing transactionId or status",
        }
    }
}

fn extract_payment(data: &EventData) -> std::result::Result<ExtractedPayment, MissingField> {
    let order = data.order.as_ref();
    let payment = data.payment.as_ref();

    // Payment links carry the real order id in order_tags.link_id; plain
    // orders carry it in order_id.
    let order_id = order
        .and_then(|o| o.order_tags.as_ref())
        .and_then(|t| t.link_id.as_ref())
        .and_then(stringify)
        .or_else(|| order.and_then(|o| o.order_id.as_ref()).and_then(stringify))
        .ok_or(MissingField::OrderId)?;

    let transaction_id = payment
        .and_then(|p| p.cf_payment_id.as_ref())
        .and_then(stringify)
        .ok_or(MissingField::TransactionIdOrStatus)?;

    let status = payment
        .and_then(|p| p.payment_status.clone())
        .ok_or(MissingField::TransactionIdOrStatus)?;

    // Prefer the order amount; a missing or non-numeric value falls through
    // to the payment amount, then to zero.
    let amount = order
        .and_then(|o| o.order_amount.as_ref())
        .and_then(numeric)
        .or_else(|| {
            payment
                .and_then(|p| p.payment_amount.as_ref())
                .and_then(numeric)
        })
        .unwrap_or(0.0);

    Ok(ExtractedPayment {
        order_id,
        transaction_id,
        status,
        amount,
    })
}

/// Ids arrive as either JSON strings or numbers depending on the gateway.
fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Amounts arrive as numbers or numeric strings; anything else counts as absent.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn customer_from(details: Option<&CustomerDetails>) -> CustomerInfo {
    match details {
        Some(d) => CustomerInfo {
            name: d.customer_name.clone(),
            email: d.customer_email.clone(),
            phone: d.customer_phone.clone(),
        },
        None => CustomerInfo::default(),
    }
}
