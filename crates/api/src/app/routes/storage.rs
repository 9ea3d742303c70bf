use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{StatusCode, header},
    response::IntoResponse,
};

use stockroom_infra::Table;

use crate::app::errors;
use crate::app::services::AppServices;

/// Retry persistence after a `persist_error`.
pub async fn persist(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let inventory = match services.inventory() {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    match inventory.persist() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "persist retry failed");
            errors::storage_error_to_response(e)
        }
    }
}

/// Delete every persisted table and start over with the default catalog.
pub async fn reset(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let mut inventory = match services.inventory() {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    match inventory.reset() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::storage_error_to_response(e),
    }
}

pub async fn export(
    Extension(services): Extension<Arc<AppServices>>,
    Path(table): Path<String>,
) -> axum::response::Response {
    let Some(table) = Table::from_name(&table) else {
        return errors::json_error(
            StatusCode::NOT_FOUND,
            "unknown_table",
            format!("no table named {table}"),
        );
    };
    let inventory = match services.inventory() {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    match inventory.export(table) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{table}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => errors::storage_error_to_response(e),
    }
}
