use axum::{
    Router,
    routing::{delete, get, post},
};

pub mod catalog;
pub mod stock;
pub mod storage;
pub mod system;

/// Router for every inventory endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/overview", get(stock::overview))
        .route("/ledger", get(stock::ledger))
        .route(
            "/modifications",
            get(stock::modifications).post(stock::record_modification),
        )
        .route("/stock", post(stock::add_stock))
        .route("/issues", post(stock::issue_items))
        .route(
            "/departments",
            get(catalog::list_departments).post(catalog::add_department),
        )
        .route("/departments/:name", delete(catalog::remove_department))
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::add_category),
        )
        .route("/categories/:name", delete(catalog::remove_category))
        .route("/storage", delete(storage::reset))
        .route("/storage/persist", post(storage::persist))
        .route("/storage/export/:table", get(storage::export))
}
