// ABOUTME: Client configuration resolved from the environment

use std::env;

/// Backend endpoint configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash
    pub api_url: String,
}

impl ClientConfig {
    /// Read configuration from the environment, falling back to the local
    /// development backend
    pub fn from_env() -> Self {
        let api_url =
            env::var("TASKDECK_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        Self::new(api_url)
    }

    /// Build a configuration for an explicit base URL
    pub fn new(api_url: impl Into<String>) -> Self {
        let mut api_url = api_url.into();
        while api_url.ends_with('/') {
            api_url.pop();
        }
        Self { api_url }
    }
}
