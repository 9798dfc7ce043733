use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ViewerConfig;
use crate::errors::BackendError;

/// Transport seam between the view and the inventory REST backend.
///
/// Bodies travel as JSON values; typing them is the caller's job.
#[async_trait]
pub trait InventoryBackend: Send + Sync {
    /// GET `path` and return the decoded JSON body of a 2xx response.
    async fn get_json(&self, path: &str) -> Result<Value, BackendError>;

    /// POST `body` as JSON to `path`. Any 2xx counts as success.
    async fn post_json(&self, path: &str, body: Value) -> Result<(), BackendError>;
}

#[cfg(test)]
mockall::mock! {
    pub InventoryBackend {}

    #[async_trait]
    impl InventoryBackend for InventoryBackend {
        async fn get_json(&self, path: &str) -> Result<Value, BackendError>;
        async fn post_json(&self, path: &str, body: Value) -> Result<(), BackendError>;
    }
}

/// `reqwest`-backed client for the inventory backend.
#[derive(Clone, Debug)]
pub struct HttpInventoryClient {
    client: Client,
    base_url: String,
}

impl HttpInventoryClient {
    pub fn new(config: &ViewerConfig) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| BackendError::Transport {
            path: String::new(),
            message: format!("failed to build HTTP client: {}", e),
        })?;
        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, BackendError> {
        Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| BackendError::Transport {
            path: path.to_string(),
            message: format!("invalid URL: {}", e),
        })
    }

    fn check_status(path: &str, response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(BackendError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

fn transport(path: &str, err: reqwest::Error) -> BackendError {
    BackendError::Transport {
        path: path.to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl InventoryBackend for HttpInventoryClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get_json(&self, path: &str) -> Result<Value, BackendError> {
        let response = self
            .client
            .get(self.url(path)?)
            .send()
            .await
            .map_err(|e| transport(path, e))?;
        let response = Self::check_status(path, response)?;
        debug!(status = %response.status(), "GET succeeded");

        response
            .json::<Value>()
            .await
            .map_err(|e| BackendError::Decode {
                path: path.to_string(),
                message: e.to_string(),
            })
    }

    #[instrument(skip(self, body), fields(base_url = %self.base_url))]
    async fn post_json(&self, path: &str, body: Value) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url(path)?)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport(path, e))?;
        let response = Self::check_status(path, response)?;
        debug!(status = %response.status(), "POST succeeded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = HttpInventoryClient::with_client(Client::new(), "http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(
            client.url("/products").unwrap().as_str(),
            "http://localhost:3000/products"
        );
    }

    #[test]
    fn builds_from_config_with_timeout() {
        let mut config = ViewerConfig::new("http://inventory.local:8080");
        config.request_timeout_secs = Some(5);
        let client = HttpInventoryClient::new(&config).unwrap();
        assert_eq!(
            client.url("/shipments").unwrap().as_str(),
            "http://inventory.local:8080/shipments"
        );
    }
}
