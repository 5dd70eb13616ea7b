//! Request extractors with rejections in the service's error shape.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejection is an [`AppError`].
///
/// A body that is not JSON, or whose fields have the wrong JSON type
/// (`"heat_number": null`, `"log_number": "1"`), answers 400
/// `VALIDATION_ERROR` like any other invalid input instead of axum's
/// plain-text 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
