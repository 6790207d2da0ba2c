use async_trait::async_trait;
use tracing::info;

use crate::domain::models::reservation::{
    Availability, AvailabilityQuery, NewReservation, Reservation, ReservationCreated, ReservationFilter,
};
use crate::domain::ports::ReservationApi;
use crate::error::AppError;
use crate::infra::http::backend::HttpBackend;

const RESERVATIONS: &str = "/api/reservas";

pub struct HttpReservationApi {
    backend: HttpBackend,
}

impl HttpReservationApi {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ReservationApi for HttpReservationApi {
    async fn list(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>, AppError> {
        self.backend.get_json_with_query(RESERVATIONS, filter).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError> {
        self.backend.find_json(&format!("{}/{}", RESERVATIONS, id)).await
    }

    async fn create(&self, reservation: &NewReservation) -> Result<ReservationCreated, AppError> {
        let created: ReservationCreated = self.backend.post_json(RESERVATIONS, reservation).await?;
        info!("Reservation {} created, total {}", created.id, created.total_price);
        Ok(created)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.backend.delete(&format!("{}/{}", RESERVATIONS, id)).await?;
        info!("Reservation {} deleted", id);
        Ok(())
    }

    async fn check_availability(&self, query: &AvailabilityQuery) -> Result<Availability, AppError> {
        self.backend
            .get_json_with_query(&format!("{}/check", RESERVATIONS), query)
            .await
    }
}
