use crate::domain::models::{
    client::{Client, ClientPayload},
    court::{Court, CourtPayload},
    payment::{PaymentMethod, PaymentMethodPayload, PaymentReceipt, PaymentRequest},
    reservation::{Availability, AvailabilityQuery, NewReservation, Reservation, ReservationCreated, ReservationFilter},
    service::{NewService, Service},
    sport::{NewSport, Sport, SportPatch},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait SportApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Sport>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Sport>, AppError>;
    async fn create(&self, sport: &NewSport) -> Result<Sport, AppError>;
    async fn update(&self, id: i64, patch: &SportPatch) -> Result<Sport, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    async fn list_services(&self, sport_id: i64) -> Result<Vec<Service>, AppError>;
    async fn create_service(&self, sport_id: i64, service: &NewService) -> Result<Service, AppError>;
}

#[async_trait]
pub trait CourtApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Court>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Court>, AppError>;
    async fn create(&self, court: &CourtPayload) -> Result<Court, AppError>;
    async fn update(&self, id: i64, court: &CourtPayload) -> Result<Court, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait ServiceApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Service>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Service>, AppError>;
    async fn create(&self, service: &NewService) -> Result<Service, AppError>;
    async fn update(&self, id: i64, service: &NewService) -> Result<Service, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait ClientApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Client>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, AppError>;
    async fn create(&self, client: &ClientPayload) -> Result<Client, AppError>;
    async fn update(&self, id: i64, client: &ClientPayload) -> Result<Client, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait ReservationApi: Send + Sync {
    async fn list(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError>;
    async fn create(&self, reservation: &NewReservation) -> Result<ReservationCreated, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    async fn check_availability(&self, query: &AvailabilityQuery) -> Result<Availability, AppError>;
}

#[async_trait]
pub trait PaymentApi: Send + Sync {
    async fn list_methods(&self) -> Result<Vec<PaymentMethod>, AppError>;
    async fn find_method(&self, id: i64) -> Result<Option<PaymentMethod>, AppError>;
    async fn create_method(&self, method: &PaymentMethodPayload) -> Result<PaymentMethod, AppError>;
    async fn update_method(&self, id: i64, method: &PaymentMethodPayload) -> Result<PaymentMethod, AppError>;
    async fn delete_method(&self, id: i64) -> Result<(), AppError>;
    async fn pay_reservation(&self, reservation_id: i64, payment: &PaymentRequest) -> Result<PaymentReceipt, AppError>;
}
