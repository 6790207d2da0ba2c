use std::sync::Arc;
use crate::domain::ports::{ClientApi, CourtApi, PaymentApi, ReservationApi, ServiceApi, SportApi};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sport_api: Arc<dyn SportApi>,
    pub court_api: Arc<dyn CourtApi>,
    pub service_api: Arc<dyn ServiceApi>,
    pub client_api: Arc<dyn ClientApi>,
    pub reservation_api: Arc<dyn ReservationApi>,
    pub payment_api: Arc<dyn PaymentApi>,
}
