//! Measurement HTTP handlers.
//!
//! - POST /measurements - Record a measurement for a customer
//! - GET /measurements - List measurements, optionally filtered by customer
//! - GET /measurements/{id} - Get a single measurement
//! - DELETE /measurements/{id} - Delete a measurement

use crate::{
    AppState,
    error::AppError,
    extract::AppJson,
    models::measurement::{CreateMeasurementRequest, Measurement, MeasurementListQuery},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

/// Record a new measurement.
///
/// The owning customer is looked up first so a dangling `customer_id` comes
/// back as a 404 instead of a raw foreign-key violation.
pub async fn create_measurement(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateMeasurementRequest>,
) -> Result<(StatusCode, Json<Measurement>), AppError> {
    request.validate().map_err(AppError::InvalidRequest)?;

    sqlx::query("SELECT id FROM customers WHERE id = $1")
        .bind(request.customer_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::CustomerNotFound)?;

    let measurement = sqlx::query_as::<_, Measurement>(
        r#"
        INSERT INTO measurements (customer_id, chest, waist, shoulder, length)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, customer_id, chest, waist, shoulder, length, created_at
        "#,
    )
    .bind(request.customer_id)
    .bind(request.chest)
    .bind(request.waist)
    .bind(request.shoulder)
    .bind(request.length)
    .fetch_one(&state.pool)
    .await
    // Customer deleted between the check above and this insert: the cascade
    // constraint reports it, and it is still a 404, not a server fault.
    .map_err(AppError::customer_fk)?;

    Ok((StatusCode::CREATED, Json(measurement)))
}

/// List measurements, newest first, optionally for one customer.
///
/// # Endpoint
///
/// `GET /measurements?customer_id=3`
pub async fn list_measurements(
    State(state): State<AppState>,
    Query(query): Query<MeasurementListQuery>,
) -> Result<Json<Vec<Measurement>>, AppError> {
    let measurements = sqlx::query_as::<_, Measurement>(
        r#"
        SELECT id, customer_id, chest, waist, shoulder, length, created_at
        FROM measurements
        WHERE ($1::INT IS NULL OR customer_id = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(query.customer_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(measurements))
}

/// Get a specific measurement by ID.
pub async fn get_measurement(
    State(state): State<AppState>,
    Path(measurement_id): Path<i32>,
) -> Result<Json<Measurement>, AppError> {
    let measurement = sqlx::query_as::<_, Measurement>(
        r#"
        SELECT id, customer_id, chest, waist, shoulder, length, created_at
        FROM measurements
        WHERE id = $1
        "#,
    )
    .bind(measurement_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::MeasurementNotFound)?;

    Ok(Json(measurement))
}

/// Delete a measurement.
pub async fn delete_measurement(
    State(state): State<AppState>,
    Path(measurement_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM measurements WHERE id = $1")
        .bind(measurement_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::MeasurementNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
