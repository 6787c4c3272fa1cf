use crate::error::ClientResult;
use crate::transport::Transport;
use crate::types::{ConfigResponse, HttpRequest};
use std::sync::Arc;
use tracing::debug;

pub const CONFIG_PATH: &str = "/api/config";

/// Loads the application configuration from the serving origin.
#[derive(Clone)]
pub struct ConfigService {
    transport: Arc<dyn Transport>,
}

impl ConfigService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// One GET per call. The response is returned as-is and failures are
    /// left to the caller.
    pub async fn load_config(&self) -> ClientResult<ConfigResponse> {
        debug!(path = CONFIG_PATH, "Loading config");
        self.transport
            .send(HttpRequest::get(CONFIG_PATH))
            .await
            .map(ConfigResponse::from)
    }
}
