use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::models::clock::ClockTime;
use crate::domain::models::payment::PaymentSummary;
use crate::domain::models::price::Price;
use crate::domain::services::interval::WrapInterval;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ReservedService {
    #[serde(rename = "id_servicio")]
    pub service_id: i64,
    #[serde(rename = "cantidad", default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Reservation {
    #[serde(rename = "id_reserva")]
    pub id: i64,
    #[serde(rename = "id_cliente")]
    pub client_id: i64,
    #[serde(rename = "cliente_nombre", default)]
    pub client_first_name: Option<String>,
    #[serde(rename = "cliente_apellido", default)]
    pub client_last_name: Option<String>,
    #[serde(rename = "id_cancha")]
    pub court_id: i64,
    #[serde(rename = "fecha_reserva")]
    pub date: NaiveDate,
    #[serde(rename = "hora_inicio")]
    pub start_time: ClockTime,
    #[serde(rename = "hora_fin")]
    pub end_time: ClockTime,
    #[serde(rename = "precio_total", default)]
    pub total_price: Price,
    #[serde(rename = "usa_iluminacion", default)]
    pub uses_lighting: bool,
    #[serde(rename = "pago", default)]
    pub payment: Option<PaymentSummary>,
    #[serde(rename = "servicios_adicionales", default)]
    pub services: Vec<ReservedService>,
}

impl Reservation {
    pub fn interval(&self) -> WrapInterval {
        WrapInterval::from_clock(self.start_time, self.end_time)
    }

    pub fn is_paid(&self) -> bool {
        self.payment.as_ref().is_some_and(|p| p.method_name.is_some())
    }

    pub fn client_name(&self) -> String {
        format!(
            "{} {}",
            self.client_first_name.as_deref().unwrap_or_default(),
            self.client_last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NewReservation {
    #[serde(rename = "id_cliente")]
    pub client_id: i64,
    #[serde(rename = "id_cancha")]
    pub court_id: i64,
    #[serde(rename = "fecha_reserva")]
    pub date: NaiveDate,
    #[serde(rename = "hora_inicio")]
    pub start_time: ClockTime,
    #[serde(rename = "hora_fin")]
    pub end_time: ClockTime,
    #[serde(rename = "usa_iluminacion")]
    pub uses_lighting: bool,
    #[serde(rename = "servicios_adicionales")]
    pub services: Vec<ReservedService>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ReservationCreated {
    #[serde(rename = "id_reserva")]
    pub id: i64,
    #[serde(rename = "precio_total", default)]
    pub total_price: Price,
}

/// Query string of the reservation listing.
#[derive(Debug, Serialize, Clone, Copy, Default)]
pub struct ReservationFilter {
    #[serde(rename = "id_cancha", skip_serializing_if = "Option::is_none")]
    pub court_id: Option<i64>,
    #[serde(rename = "fecha_reserva", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Clone, Copy)]
pub struct AvailabilityQuery {
    #[serde(rename = "id_cancha")]
    pub court_id: i64,
    #[serde(rename = "fecha_reserva")]
    pub date: NaiveDate,
    #[serde(rename = "hora_inicio")]
    pub start_time: ClockTime,
    #[serde(rename = "hora_fin")]
    pub end_time: ClockTime,
}

impl From<&NewReservation> for AvailabilityQuery {
    fn from(r: &NewReservation) -> Self {
        Self {
            court_id: r.court_id,
            date: r.date,
            start_time: r.start_time,
            end_time: r.end_time,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Availability {
    pub available: bool,
    #[serde(default)]
    pub reason: Option<String>,
}
