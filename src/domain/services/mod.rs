pub mod availability;
pub mod booking_controller;
pub mod interval;
pub mod pricing;
pub mod sport_inference;
