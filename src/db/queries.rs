use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::models::{CustomerInfo, NewTransaction, OrderRecord, TransactionRecord};

fn now() -> i64 {
    Utc::now().timestamp()
}

pub fn get_transaction(
    conn: &Connection,
    transaction_id: &str,
) -> Result<Option<TransactionRecord>> {
    conn.query_row(
        "SELECT transaction_id, order_id, status, reference, amount,
                customer_name, customer_email, customer_phone, created_at
         FROM transactions WHERE transaction_id = ?1",
        params![transaction_id],
        |row| {
            Ok(TransactionRecord {
                transaction_id: row.get(0)?,
                order_id: row.get(1)?,
                status: row.get(2)?,
                reference: row.get(3)?,
                amount: row.get(4)?,
                customer: CustomerInfo {
                    name: row.get(5)?,
                    email: row.get(6)?,
                    phone: row.get(7)?,
                },
                created_at: row.get(8)?,
            })
        },
    )
    .optional()
    .map_err(Into::into)
}

/// Record the transaction unless one with the same id already exists.
/// Returns false when the id was already on file. The primary key makes the
/// existence check and the insert a single atomic step, so two concurrent
/// deliveries of the same payment cannot both win.
pub fn insert_transaction_if_absent(conn: &Connection, input: &NewTransaction) -> Result<bool> {
    let changed = conn.execute(
        "INSERT INTO transactions (transaction_id, order_id, status, reference, amount,
                                   customer_name, customer_email, customer_phone, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(transaction_id) DO NOTHING",
        params![
            input.transaction_id,
            input.order_id,
            input.status,
            input.reference,
            input.amount,
            input.customer.name,
            input.customer.email,
            input.customer.phone,
            now(),
        ],
    )?;
    Ok(changed == 1)
}

pub fn get_order(conn: &Connection, order_id: &str) -> Result<Option<OrderRecord>> {
    conn.query_row(
        "SELECT order_id, status, payment_status, created_on, user_id,
                amount, general_menu, extra_menu, payment_confirmed_on
         FROM orders WHERE order_id = ?1",
        params![order_id],
        |row| {
            Ok(OrderRecord {
                order_id: row.get(0)?,
                status: row.get(1)?,
                payment_status: row.get(2)?,
                created_on: row.get(3)?,
                user_id: row.get(4)?,
                amount: row.get(5)?,
                general_menu: row.get(6)?,
                extra_menu: row.get(7)?,
                payment_confirmed_on: row.get(8)?,
            })
        },
    )
    .optional()
    .map_err(Into::into)
}

/// Apply the gateway's payment status to an existing order. `status` and
/// `payment_confirmed_on` move only on SUCCESS; `payment_status` always
/// follows the gateway. Returns false when no such order exists.
pub fn update_order_payment(conn: &Connection, order_id: &str, payment_status: &str) -> Result<bool> {
    let changed = if payment_status == "SUCCESS" {
        conn.execute(
            "UPDATE orders
             SET status = 'paid', payment_status = ?2, payment_confirmed_on = ?3
             WHERE order_id = ?1",
            params![order_id, payment_status, now()],
        )?
    } else {
        conn.execute(
            "UPDATE orders SET payment_status = ?2 WHERE order_id = ?1",
            params![order_id, payment_status],
        )?
    };
    Ok(changed == 1)
}

/// Create the placeholder order used for gateway test-mode deliveries, so
/// they exercise the full write path without a real order on file.
pub fn create_test_order(conn: &Connection, order_id: &str, amount: f64) -> Result<()> {
    let ts = now();
    let menu = serde_json::json!({ "dummy_item_1": 1 }).to_string();
    conn.execute(
        "INSERT INTO orders (order_id, status, payment_status, created_on, user_id,
                             amount, general_menu, extra_menu, payment_confirmed_on)
         VALUES (?1, 'paid', 'SUCCESS', ?2, 'test_user', ?3, ?4, 'nil', ?2)
         ON CONFLICT(order_id) DO NOTHING",
        params![order_id, ts, amount, menu],
    )?;
    Ok(())
}
