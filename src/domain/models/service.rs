use serde::{Deserialize, Serialize};

use crate::domain::models::price::Price;

/// Add-on service that can be booked together with a court.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Service {
    #[serde(rename = "id_servicio")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio_adicional", default)]
    pub unit_price: Price,
    #[serde(rename = "activo", default = "active_by_default")]
    pub active: bool,
    #[serde(rename = "id_deporte", default, skip_serializing_if = "Option::is_none")]
    pub sport_id: Option<i64>,
}

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Serialize, Clone)]
pub struct NewService {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio_adicional")]
    pub unit_price: Price,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "id_deporte", skip_serializing_if = "Option::is_none")]
    pub sport_id: Option<i64>,
}
