use std::sync::{Arc, Mutex, MutexGuard};

use axum::http::StatusCode;

use stockroom_infra::{InventoryService, TableStore};

use crate::app::errors;

/// Storage backend chosen at startup.
pub type SharedStore = Arc<dyn TableStore>;

/// The single inventory session.
///
/// One lock serializes every operation end to end (validate, append,
/// recompute, persist), so reads never observe a half-applied change.
pub struct AppServices {
    inventory: Mutex<InventoryService<SharedStore>>,
}

impl AppServices {
    pub fn new(inventory: InventoryService<SharedStore>) -> Self {
        Self {
            inventory: Mutex::new(inventory),
        }
    }

    pub fn inventory(
        &self,
    ) -> Result<MutexGuard<'_, InventoryService<SharedStore>>, axum::response::Response> {
        self.inventory.lock().map_err(|_| {
            tracing::error!("inventory lock poisoned");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "lock_poisoned",
                "inventory state is unavailable",
            )
        })
    }
}
