//! Dependency initialization and wiring for the search service.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Settings;
use crate::ServiceError;
use search_service_api::AppState;
use search_service_repository::{OpenSearchClient, SearchEngineClient, SearchService};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The long-lived search service shared by every request.
    pub service: Arc<SearchService>,
}

impl Dependencies {
    /// Initialize all dependencies from settings.
    ///
    /// The engine is probed once so an unreachable cluster shows up in the
    /// logs at startup; the service still starts, since search failures are
    /// handled per request.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ServiceError)` - If the engine client cannot be built
    pub async fn new(settings: &Settings) -> Result<Self, ServiceError> {
        info!(
            engine = ?settings.engine,
            fallback = ?settings.service.fallback,
            "Initializing dependencies"
        );

        let engine = OpenSearchClient::new(&settings.engine)
            .map_err(|e| ServiceError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        Ok(Self::with_engine(Arc::new(engine), settings).await)
    }

    /// Wire the service around an existing engine client.
    pub async fn with_engine(engine: Arc<dyn SearchEngineClient>, settings: &Settings) -> Self {
        match engine.health_check().await {
            Ok(true) => info!("OpenSearch connection verified"),
            Ok(false) => warn!("OpenSearch cluster is unhealthy"),
            Err(e) => warn!(error = %e, "OpenSearch health check failed"),
        }

        let service = SearchService::with_config(engine, settings.service.clone());

        Self {
            service: Arc::new(service),
        }
    }

    /// State for the HTTP router.
    pub fn app_state(&self) -> AppState {
        AppState::new(self.service.clone())
    }
}
