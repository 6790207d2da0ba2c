use serde::{Deserialize, Serialize};

use crate::domain::models::price::Price;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PaymentMethod {
    #[serde(rename = "id_metodo")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct PaymentMethodPayload {
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Latest payment registered for a reservation, as listed by the backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PaymentSummary {
    #[serde(rename = "id_pago")]
    pub id: i64,
    #[serde(rename = "id_metodo")]
    pub method_id: i64,
    #[serde(rename = "metodo_nombre", default)]
    pub method_name: Option<String>,
    #[serde(rename = "monto", default)]
    pub amount: Price,
}

#[derive(Debug, Serialize, Clone)]
pub struct PaymentRequest {
    #[serde(rename = "id_metodo")]
    pub method_id: i64,
    #[serde(rename = "monto")]
    pub amount: Price,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PaymentReceipt {
    #[serde(rename = "id_pago")]
    pub id: i64,
    #[serde(rename = "id_reserva")]
    pub reservation_id: i64,
    #[serde(rename = "monto", default)]
    pub amount: Price,
}
