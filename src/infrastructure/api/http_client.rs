use crate::application::ports::RemoteApi;
use crate::shared::config::ApiConfig;
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// HTTP implementation of the remote API capability. Paths are joined onto
/// the configured base url; any non-success status is a failed dispatch.
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl RemoteApi for HttpApiClient {
    async fn post(&self, path: &str, body: &Value) -> Result<Value, AppError> {
        let url = self.url_for(path);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::SyncDispatch(format!(
                "POST {url} returned {status}: {detail}"
            )));
        }

        // Empty bodies are valid acknowledgments.
        let text = response.text().await?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| AppError::SyncDispatch(format!("Invalid response from {url}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpApiClient {
        HttpApiClient::new(&ApiConfig {
            base_url: base.to_string(),
            request_timeout: 5,
        })
        .unwrap()
    }

    #[test]
    fn joins_paths_onto_the_base_url() {
        let api = client("http://localhost:8001");
        assert_eq!(
            api.url_for("/api/attendance/"),
            "http://localhost:8001/api/attendance/"
        );
        assert_eq!(
            api.url_for("api/attendance/"),
            "http://localhost:8001/api/attendance/"
        );
    }

    #[test]
    fn trailing_slash_on_the_base_url_is_normalized() {
        let api = client("http://localhost:8001/");
        assert_eq!(
            api.url_for("/api/attendance/"),
            "http://localhost:8001/api/attendance/"
        );
    }
}
