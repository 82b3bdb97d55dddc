//! Customer management HTTP handlers.
//!
//! This module implements the customer-related API endpoints:
//! - POST /customers - Create new customer
//! - GET /customers - List all customers
//! - GET /customers/{id} - Get customer by ID
//! - PUT /customers/{id} - Replace customer details
//! - DELETE /customers/{id} - Delete customer (cascades to measurements/orders)
//!
//! All routes sit behind the bearer-token middleware.

use crate::{
    AppState,
    error::AppError,
    extract::AppJson,
    models::customer::{Customer, CustomerPayload},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// Create a new customer.
///
/// # Endpoint
///
/// `POST /customers`
///
/// # Response
///
/// - **Success (201 Created)**: the created customer, id assigned
/// - **Error (400)**: blank name or phone
/// - **Error (401)**: missing or invalid bearer token
pub async fn create_customer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CustomerPayload>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    payload.validate().map_err(AppError::InvalidRequest)?;

    let customer = sqlx::query_as::<_, Customer>(
        r#"
        INSERT INTO customers (name, phone, address)
        VALUES ($1, $2, $3)
        RETURNING id, name, phone, address, created_at
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.phone)
    .bind(&payload.address)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

/// List all customers, newest first.
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = sqlx::query_as::<_, Customer>(
        r#"
        SELECT id, name, phone, address, created_at
        FROM customers
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(customers))
}

/// Get a specific customer by ID. Returns 404 if the row does not exist.
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<Json<Customer>, AppError> {
    let customer = sqlx::query_as::<_, Customer>(
        r#"
        SELECT id, name, phone, address, created_at
        FROM customers
        WHERE id = $1
        "#,
    )
    .bind(customer_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::CustomerNotFound)?;

    Ok(Json(customer))
}

/// Replace a customer's details.
///
/// `PUT` semantics: all three fields are required and overwrite the row.
pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
    AppJson(payload): AppJson<CustomerPayload>,
) -> Result<Json<Customer>, AppError> {
    payload.validate().map_err(AppError::InvalidRequest)?;

    let customer = sqlx::query_as::<_, Customer>(
        r#"
        UPDATE customers
        SET name = $2, phone = $3, address = $4
        WHERE id = $1
        RETURNING id, name, phone, address, created_at
        "#,
    )
    .bind(customer_id)
    .bind(&payload.name)
    .bind(&payload.phone)
    .bind(&payload.address)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::CustomerNotFound)?;

    Ok(Json(customer))
}

/// Delete a customer.
///
/// The foreign-key cascade removes the customer's measurements and orders in
/// the same statement; no application-level cleanup is needed.
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(customer_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::CustomerNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
