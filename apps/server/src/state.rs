//! Shared application state

use std::sync::Arc;

use crate::config::Config;
use crate::services::QueryServiceClient;
use crate::Result;

/// Shared application state passed to all handlers.
///
/// Holds read-only infrastructure only; there is no mutable domain state
/// shared between concurrent requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub query_client: Arc<QueryServiceClient>,
}

impl AppState {
    /// Initialize the application state
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);
        let query_client = Arc::new(QueryServiceClient::new(&config.query_service)?);

        Ok(Self {
            config,
            query_client,
        })
    }
}
