//! Client configuration.

/// Environment variable holding the server endpoint URL.
pub const ENDPOINT_ENV_VAR: &str = "DROPFOUR_WS_URL";

/// Endpoint used when the environment does not specify one.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8000";

/// Configuration for a [`GameClient`](crate::GameClient) connection.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket endpoint of the game server.
    pub endpoint: String,
}

impl ClientConfig {
    /// Reads the configuration from the environment.
    ///
    /// Falls back to [`DEFAULT_ENDPOINT`] when `DROPFOUR_WS_URL` is unset.
    pub fn from_env() -> Self {
        let endpoint = std::env::var(ENDPOINT_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_owned());
        Self { endpoint }
    }

    /// Overrides the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
        }
    }
}
