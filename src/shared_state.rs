use std::sync::Arc;

use crate::services::catalog_service::CatalogSource;

#[derive(Clone)]
pub struct AppState {
    /// Read-only lookup data; the estimator never touches it directly
    pub catalog: Arc<dyn CatalogSource>,
    /// Include internal error messages in 500 responses
    pub expose_error_details: bool,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogSource>, expose_error_details: bool) -> Self {
        Self { catalog, expose_error_details }
    }
}
