use std::sync::Arc;

use anyhow::Context;

use stockroom_infra::{AppConfig, DirectoryTableStore, InventoryService, TableStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let store: Arc<dyn TableStore> = Arc::new(DirectoryTableStore::new(&config.data_dir));
    let service = InventoryService::load(store).with_context(|| {
        format!("failed to load inventory from {}", config.data_dir.display())
    })?;

    let app = stockroom_api::app::build_app(service);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        data_dir = %config.data_dir.display(),
        "listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
