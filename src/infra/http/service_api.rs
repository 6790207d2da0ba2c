use async_trait::async_trait;

use crate::domain::models::service::{NewService, Service};
use crate::domain::ports::ServiceApi;
use crate::error::AppError;
use crate::infra::http::backend::HttpBackend;

const SERVICES: &str = "/api/servicios";

pub struct HttpServiceApi {
    backend: HttpBackend,
}

impl HttpServiceApi {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ServiceApi for HttpServiceApi {
    async fn list(&self) -> Result<Vec<Service>, AppError> {
        self.backend.get_json(SERVICES).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Service>, AppError> {
        self.backend.find_json(&format!("{}/{}", SERVICES, id)).await
    }

    async fn create(&self, service: &NewService) -> Result<Service, AppError> {
        self.backend.post_json(SERVICES, service).await
    }

    async fn update(&self, id: i64, service: &NewService) -> Result<Service, AppError> {
        self.backend.put_json(&format!("{}/{}", SERVICES, id), service).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.backend.delete(&format!("{}/{}", SERVICES, id)).await
    }
}
