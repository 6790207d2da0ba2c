use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::http::{
    backend::HttpBackend, client_api::HttpClientApi, court_api::HttpCourtApi,
    payment_api::HttpPaymentApi, reservation_api::HttpReservationApi,
    service_api::HttpServiceApi, sport_api::HttpSportApi,
};

pub fn bootstrap_state(config: &Config) -> AppState {
    info!("Using booking backend at {}", config.api_base_url);

    let backend = HttpBackend::new(
        config.api_base_url.clone(),
        Duration::from_secs(config.http_timeout_secs),
    );

    AppState {
        config: config.clone(),
        sport_api: Arc::new(HttpSportApi::new(backend.clone())),
        court_api: Arc::new(HttpCourtApi::new(backend.clone())),
        service_api: Arc::new(HttpServiceApi::new(backend.clone())),
        client_api: Arc::new(HttpClientApi::new(backend.clone())),
        reservation_api: Arc::new(HttpReservationApi::new(backend.clone())),
        payment_api: Arc::new(HttpPaymentApi::new(backend)),
    }
}
