use async_trait::async_trait;

use crate::domain::models::court::{Court, CourtPayload};
use crate::domain::ports::CourtApi;
use crate::error::AppError;
use crate::infra::http::backend::HttpBackend;

const COURTS: &str = "/api/canchas";

pub struct HttpCourtApi {
    backend: HttpBackend,
}

impl HttpCourtApi {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl CourtApi for HttpCourtApi {
    async fn list(&self) -> Result<Vec<Court>, AppError> {
        self.backend.get_json(COURTS).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Court>, AppError> {
        self.backend.find_json(&format!("{}/{}", COURTS, id)).await
    }

    async fn create(&self, court: &CourtPayload) -> Result<Court, AppError> {
        if court.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            return Err(AppError::Validation("A court needs a name".into()));
        }
        self.backend.post_json(COURTS, court).await
    }

    async fn update(&self, id: i64, court: &CourtPayload) -> Result<Court, AppError> {
        self.backend.put_json(&format!("{}/{}", COURTS, id), court).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.backend.delete(&format!("{}/{}", COURTS, id)).await
    }
}
