//! Order HTTP handlers.
//!
//! - POST /orders - Create an order for a customer
//! - GET /orders - List orders, filterable by customer and status
//! - GET /orders/{id} - Get a single order
//! - PUT /orders/{id} - Update order details and payment tracking
//! - DELETE /orders/{id} - Delete an order

use crate::{
    AppState,
    error::AppError,
    extract::AppJson,
    models::order::{CreateOrderRequest, Order, OrderListQuery, UpdateOrderRequest},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

const ORDER_COLUMNS: &str = "id, customer_id, dress_type, price, paid_amount, trial_date, \
                             delivery_date, status, payment_mode, payment_date, created_at";

/// Create a new order.
///
/// # Endpoint
///
/// `POST /orders`
///
/// # Response
///
/// - **Success (201 Created)**: the created order
/// - **Error (400)**: negative price/paid_amount or blank dress type
/// - **Error (404)**: `customer_id` does not reference a live customer
pub async fn create_order(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    request.validate().map_err(AppError::InvalidRequest)?;

    sqlx::query("SELECT id FROM customers WHERE id = $1")
        .bind(request.customer_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::CustomerNotFound)?;

    let order = sqlx::query_as::<_, Order>(&format!(
        r#"
        INSERT INTO orders
            (customer_id, dress_type, price, paid_amount, trial_date,
             delivery_date, status, payment_mode, payment_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {ORDER_COLUMNS}
        "#
    ))
    .bind(request.customer_id)
    .bind(&request.dress_type)
    .bind(request.price)
    .bind(request.paid_amount)
    .bind(request.trial_date)
    .bind(request.delivery_date)
    .bind(&request.status)
    .bind(&request.payment_mode)
    .bind(request.payment_date)
    .fetch_one(&state.pool)
    .await
    // Customer deleted between the check above and this insert: the cascade
    // constraint reports it, and it is still a 404, not a server fault.
    .map_err(AppError::customer_fk)?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// List orders, newest first.
///
/// # Endpoint
///
/// `GET /orders?customer_id=3&status=Pending`
///
/// Both filters are optional and combine with AND.
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        r#"
        SELECT {ORDER_COLUMNS}
        FROM orders
        WHERE ($1::INT IS NULL OR customer_id = $1)
          AND ($2::VARCHAR IS NULL OR status = $2)
        ORDER BY created_at DESC
        "#
    ))
    .bind(query.customer_id)
    .bind(&query.status)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(orders))
}

/// Get a specific order by ID.
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<Json<Order>, AppError> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
    ))
    .bind(order_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::OrderNotFound)?;

    Ok(Json(order))
}

/// Update an order's details and payment tracking.
///
/// Omitted fields keep their current value (`COALESCE` in the statement), so
/// a payment can be recorded with just `paid_amount`, `payment_mode`, and
/// `payment_date`.
pub async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
    AppJson(request): AppJson<UpdateOrderRequest>,
) -> Result<Json<Order>, AppError> {
    request.validate().map_err(AppError::InvalidRequest)?;

    let order = sqlx::query_as::<_, Order>(&format!(
        r#"
        UPDATE orders
        SET dress_type = COALESCE($2, dress_type),
            price = COALESCE($3, price),
            paid_amount = COALESCE($4, paid_amount),
            trial_date = COALESCE($5, trial_date),
            delivery_date = COALESCE($6, delivery_date),
            status = COALESCE($7, status),
            payment_mode = COALESCE($8, payment_mode),
            payment_date = COALESCE($9, payment_date)
        WHERE id = $1
        RETURNING {ORDER_COLUMNS}
        "#
    ))
    .bind(order_id)
    .bind(&request.dress_type)
    .bind(request.price)
    .bind(request.paid_amount)
    .bind(request.trial_date)
    .bind(request.delivery_date)
    .bind(&request.status)
    .bind(&request.payment_mode)
    .bind(request.payment_date)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::OrderNotFound)?;

    Ok(Json(order))
}

/// Delete an order.
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(order_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::OrderNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
