use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_core::ValidationError;
use stockroom_infra::{ServiceError, StorageError};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

fn validation_status(err: &ValidationError) -> StatusCode {
    match err {
        ValidationError::InsufficientStock { .. }
        | ValidationError::QuantityOverflow { .. }
        | ValidationError::AlreadyExists { .. } => StatusCode::CONFLICT,
        ValidationError::NotFound { .. } => StatusCode::NOT_FOUND,
        ValidationError::InvalidQuantity { .. }
        | ValidationError::InvalidPrice { .. }
        | ValidationError::EmptyField { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// Validation errors keep their details (`item`, `available`, ...) next to
/// `error` and `message`.
pub fn validation_error_to_response(err: ValidationError) -> axum::response::Response {
    let mut body = serde_json::to_value(&err).unwrap_or_else(|_| json!({ "error": err.code() }));
    if let Some(obj) = body.as_object_mut() {
        obj.insert("message".to_string(), json!(err.to_string()));
    }
    (validation_status(&err), axum::Json(body)).into_response()
}

pub fn storage_error_to_response(err: StorageError) -> axum::response::Response {
    match err {
        StorageError::NotFound(table) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("{table} has not been persisted"),
        ),
        other => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage_error",
            other.to_string(),
        ),
    }
}

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Validation(e) => validation_error_to_response(e),
        ServiceError::Persist(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "persist_error",
            format!("change applied but not persisted, retry POST /storage/persist: {e}"),
        ),
    }
}
