use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use stockroom_inventory::LedgerEntry;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

fn recorded(entries: Vec<LedgerEntry>) -> axum::response::Response {
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "recorded": entries })),
    )
        .into_response()
}

pub async fn overview(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let inventory = match services.inventory() {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    Json(dto::OverviewResponse::from(inventory.overview())).into_response()
}

pub async fn ledger(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let inventory = match services.inventory() {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    Json(dto::log_entries(inventory.ledger().movements().all())).into_response()
}

pub async fn modifications(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let inventory = match services.inventory() {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    Json(dto::log_entries(inventory.ledger().modifications().all())).into_response()
}

pub async fn add_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AddStockRequest>,
) -> axum::response::Response {
    let mut inventory = match services.inventory() {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    match inventory.add_stock(body.into()) {
        Ok(entries) => recorded(entries),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn issue_items(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::IssueItemsRequest>,
) -> axum::response::Response {
    let mut inventory = match services.inventory() {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    match inventory.issue_items(body.into()) {
        Ok(entries) => recorded(entries),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn record_modification(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ModificationRequest>,
) -> axum::response::Response {
    let mut inventory = match services.inventory() {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    match inventory.record_modification(body.into()) {
        Ok(entries) => recorded(entries),
        Err(e) => errors::service_error_to_response(e),
    }
}
