pub mod backend;
pub mod client_api;
pub mod court_api;
pub mod payment_api;
pub mod reservation_api;
pub mod service_api;
pub mod sport_api;
