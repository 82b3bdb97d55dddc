//! Request extractors with application-flavored rejections.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};

use crate::error::AppError;

/// JSON body extractor that converts parse failures into a structured 400.
///
/// Axum's stock `Json` rejection replies with a plain-text body; handlers use
/// this wrapper instead so an unparseable payload comes back as
/// `{"message": "Invalid JSON payload", "error": "<diagnostic>"}` rather than
/// propagating as an unhandled fault.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::MalformedPayload(rejection.body_text())),
        }
    }
}
