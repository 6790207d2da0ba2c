use async_trait::async_trait;

use crate::domain::models::client::{Client, ClientPayload};
use crate::domain::ports::ClientApi;
use crate::error::AppError;
use crate::infra::http::backend::HttpBackend;

const CLIENTS: &str = "/api/clientes";

pub struct HttpClientApi {
    backend: HttpBackend,
}

impl HttpClientApi {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ClientApi for HttpClientApi {
    async fn list(&self) -> Result<Vec<Client>, AppError> {
        self.backend.get_json(CLIENTS).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, AppError> {
        self.backend.find_json(&format!("{}/{}", CLIENTS, id)).await
    }

    async fn create(&self, client: &ClientPayload) -> Result<Client, AppError> {
        let missing = [&client.dni, &client.first_name, &client.last_name]
            .iter()
            .any(|f| f.as_deref().is_none_or(|v| v.trim().is_empty()));
        if missing {
            return Err(AppError::Validation("dni, first name and last name are required".into()));
        }
        self.backend.post_json(CLIENTS, client).await
    }

    async fn update(&self, id: i64, client: &ClientPayload) -> Result<Client, AppError> {
        self.backend.put_json(&format!("{}/{}", CLIENTS, id), client).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.backend.delete(&format!("{}/{}", CLIENTS, id)).await
    }
}
