//! Schema bootstrap: idempotent table creation and additive column migration.
//!
//! Runs once at startup, before the server accepts connections. Two phases:
//!
//! 1. **Create-if-absent**: `CREATE TABLE IF NOT EXISTS` for the three core
//!    tables, safe to re-run on every startup regardless of existing state.
//! 2. **Column migration**: a fixed list of (column, `ALTER TABLE`) pairs for
//!    payment columns that were added to `orders` after the table first
//!    shipped. Presence is detected by introspecting live column names via
//!    `information_schema`, not by a migration ledger; the list is additive
//!    and forward-only.
//!
//! Any failure in either phase propagates to `main`, which exits rather than
//! serving traffic against an unverified schema.

use crate::db::DbPool;

/// Core table DDL, executed in order. `measurements` and `orders` reference
/// `customers` with `ON DELETE CASCADE`, so deleting a customer removes their
/// dependent rows.
const CORE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id SERIAL PRIMARY KEY,
        name VARCHAR(120) NOT NULL,
        phone VARCHAR(30) NOT NULL,
        address TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS measurements (
        id SERIAL PRIMARY KEY,
        customer_id INT NOT NULL,
        chest DECIMAL(10,2) NOT NULL,
        waist DECIMAL(10,2) NOT NULL,
        shoulder DECIMAL(10,2) NOT NULL,
        length DECIMAL(10,2) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT fk_measurements_customer
            FOREIGN KEY (customer_id) REFERENCES customers(id)
            ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id SERIAL PRIMARY KEY,
        customer_id INT NOT NULL,
        dress_type VARCHAR(120) NOT NULL,
        price DECIMAL(10,2) NOT NULL,
        paid_amount DECIMAL(10,2) NOT NULL DEFAULT 0,
        trial_date DATE NULL,
        delivery_date DATE NOT NULL,
        status VARCHAR(30) NOT NULL DEFAULT 'Pending',
        payment_mode VARCHAR(30) NULL,
        payment_date DATE NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT fk_orders_customer
            FOREIGN KEY (customer_id) REFERENCES customers(id)
            ON DELETE CASCADE
    )
    "#,
];

/// Payment columns added to `orders` after the table first shipped.
///
/// Databases created before these columns existed get them retrofitted here;
/// databases created from [`CORE_TABLES`] already have them and every check
/// is a no-op.
const ORDERS_PAYMENT_COLUMNS: &[(&str, &str)] = &[
    (
        "paid_amount",
        "ALTER TABLE orders ADD COLUMN paid_amount DECIMAL(10,2) NOT NULL DEFAULT 0",
    ),
    (
        "payment_mode",
        "ALTER TABLE orders ADD COLUMN payment_mode VARCHAR(30) NULL",
    ),
    (
        "payment_date",
        "ALTER TABLE orders ADD COLUMN payment_date DATE NULL",
    ),
    (
        "trial_date",
        "ALTER TABLE orders ADD COLUMN trial_date DATE NULL",
    ),
];

/// Run both bootstrap phases in order.
///
/// The column-migration phase runs only after create-if-absent completes, so
/// it always operates against an existing `orders` table.
pub async fn bootstrap(pool: &DbPool) -> Result<(), sqlx::Error> {
    ensure_core_tables(pool).await?;
    ensure_orders_payment_columns(pool).await?;
    Ok(())
}

/// Phase one: create the three core tables if they do not exist.
async fn ensure_core_tables(pool: &DbPool) -> Result<(), sqlx::Error> {
    for ddl in CORE_TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Phase two: add any payment column missing from `orders`.
async fn ensure_orders_payment_columns(pool: &DbPool) -> Result<(), sqlx::Error> {
    for (column, ddl) in ORDERS_PAYMENT_COLUMNS {
        if !column_exists(pool, "orders", column).await? {
            sqlx::query(ddl).execute(pool).await?;
            tracing::info!("Added missing column: orders.{}", column);
        }
    }
    Ok(())
}

/// Check whether `table.column` exists in the current schema.
async fn column_exists(pool: &DbPool, table: &str, column: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as(
        "SELECT column_name FROM information_schema.columns
         WHERE table_schema = current_schema() AND table_name = $1 AND column_name = $2",
    )
    .bind(table)
    .bind(column)
    .fetch_optional(pool)
    .await?;

    Ok(row.is_some())
}
