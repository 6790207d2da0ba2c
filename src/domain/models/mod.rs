pub mod client;
pub mod clock;
pub mod court;
pub mod payment;
pub mod price;
pub mod reservation;
pub mod service;
pub mod sport;
