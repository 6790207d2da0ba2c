use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use crate::error::AppError;

/// Shared JSON-over-HTTP plumbing for every backend collection. Cloning is
/// cheap; the underlying connection pool is shared.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let res = self.send(self.client.get(self.url(path))).await?;
        Self::decode(res).await
    }

    #[instrument(skip(self, query))]
    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let res = self.send(self.client.get(self.url(path)).query(query)).await?;
        Self::decode(res).await
    }

    /// Single-resource read where a 404 means the record does not exist.
    #[instrument(skip(self))]
    pub async fn find_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, AppError> {
        match self.send(self.client.get(self.url(path))).await {
            Ok(res) => Ok(Some(Self::decode(res).await?)),
            Err(AppError::Rejected { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, body))]
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self.send(self.client.post(self.url(path)).json(body)).await?;
        Self::decode(res).await
    }

    #[instrument(skip(self, body))]
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self.send(self.client.put(self.url(path)).json(body)).await?;
        Self::decode(res).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let res = request.send().await.map_err(|e| {
            error!("Backend connection error: {}", e);
            AppError::Network(e)
        })?;

        let status = res.status();
        debug!("Backend answered {} for {}", status, res.url().path());
        if status.is_success() {
            return Ok(res);
        }

        let text = res.text().await.unwrap_or_default();
        let message = error_message(status, &text);
        if status == StatusCode::NOT_FOUND {
            warn!("Backend returned 404: {}", message);
        } else {
            error!("Backend rejected request. Status: {}, Body: {}", status, text);
        }
        Err(AppError::Rejected { status: status.as_u16(), message })
    }

    async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, AppError> {
        let bytes = res.bytes().await.map_err(AppError::Network)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            error!("Failed to parse backend JSON: {:?}", e);
            AppError::Decode(e.to_string())
        })
    }
}

/// Backend errors come as `{"error": "..."}`; fall back to the raw body and
/// finally to the status text.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body)
        && let Some(msg) = json.get("error").and_then(|e| e.as_str())
    {
        return msg.to_string();
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() <= 200 && !trimmed.starts_with('<') {
        return trimmed.to_string();
    }
    status.canonical_reason().unwrap_or("Request failed").to_string()
}
