use rusqlite::Connection;

/// Initialize the two collections used by the webhook handler.
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        -- Payment transactions (write-once, keyed by the gateway's payment id).
        -- The primary key doubles as the duplicate-delivery guard.
        CREATE TABLE IF NOT EXISTS transactions (
            transaction_id TEXT PRIMARY KEY,
            order_id TEXT NOT NULL,
            status TEXT NOT NULL,
            reference TEXT,
            amount REAL NOT NULL,
            customer_name TEXT,
            customer_email TEXT,
            customer_phone TEXT,
            created_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_transactions_order ON transactions(order_id);

        -- Orders (mutable, shared with the ordering app which normally
        -- creates them before payment lands)
        CREATE TABLE IF NOT EXISTS orders (
            order_id TEXT PRIMARY KEY,
            status TEXT,
            payment_status TEXT,
            created_on INTEGER,
            user_id TEXT,
            amount REAL,
            general_menu TEXT,
            extra_menu TEXT,
            payment_confirmed_on INTEGER
        );
        "#,
    )
}
