use async_trait::async_trait;

use crate::domain::models::service::{NewService, Service};
use crate::domain::models::sport::{NewSport, Sport, SportPatch};
use crate::domain::ports::SportApi;
use crate::error::AppError;
use crate::infra::http::backend::HttpBackend;

const SPORTS: &str = "/api/deportes";

pub struct HttpSportApi {
    backend: HttpBackend,
}

impl HttpSportApi {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl SportApi for HttpSportApi {
    async fn list(&self) -> Result<Vec<Sport>, AppError> {
        self.backend.get_json(SPORTS).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Sport>, AppError> {
        self.backend.find_json(&format!("{}/{}", SPORTS, id)).await
    }

    async fn create(&self, sport: &NewSport) -> Result<Sport, AppError> {
        self.backend.post_json(SPORTS, sport).await
    }

    async fn update(&self, id: i64, patch: &SportPatch) -> Result<Sport, AppError> {
        self.backend.put_json(&format!("{}/{}", SPORTS, id), patch).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.backend.delete(&format!("{}/{}", SPORTS, id)).await
    }

    async fn list_services(&self, sport_id: i64) -> Result<Vec<Service>, AppError> {
        let mut services: Vec<Service> = self
            .backend
            .get_json(&format!("{}/{}/servicios", SPORTS, sport_id))
            .await?;
        // The nested listing omits the owner; fill it in so callers can filter.
        for s in &mut services {
            s.sport_id.get_or_insert(sport_id);
        }
        Ok(services)
    }

    async fn create_service(&self, sport_id: i64, service: &NewService) -> Result<Service, AppError> {
        let mut created: Service = self
            .backend
            .post_json(&format!("{}/{}/servicios", SPORTS, sport_id), service)
            .await?;
        created.sport_id.get_or_insert(sport_id);
        Ok(created)
    }
}
