use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn list_departments(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let inventory = match services.inventory() {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    Json(inventory.catalog().departments().active()).into_response()
}

pub async fn add_department(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::NameRequest>,
) -> axum::response::Response {
    let mut inventory = match services.inventory() {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    match inventory.add_department(&body.name) {
        Ok(()) => (StatusCode::CREATED, Json(inventory.catalog().departments().active()))
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// Stock still held by the department is returned to Admin first; the
/// response lists those returns.
pub async fn remove_department(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
    Query(query): Query<dto::RemoveDepartmentQuery>,
) -> axum::response::Response {
    let mut inventory = match services.inventory() {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    match inventory.remove_department(&name, query.date()) {
        Ok(returns) => Json(serde_json::json!({
            "removed": name,
            "returned_to_admin": returns,
        }))
        .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let inventory = match services.inventory() {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    Json(inventory.catalog().categories().as_slice()).into_response()
}

pub async fn add_category(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::NameRequest>,
) -> axum::response::Response {
    let mut inventory = match services.inventory() {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    match inventory.add_category(&body.name) {
        Ok(()) => (StatusCode::CREATED, Json(inventory.catalog().categories().as_slice()))
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn remove_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    let mut inventory = match services.inventory() {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    match inventory.remove_category(&name) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
