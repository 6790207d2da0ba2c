use serde::{Deserialize, Serialize};

use crate::domain::models::price::Price;
use crate::domain::models::service::Service;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Sport {
    #[serde(rename = "id_deporte")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "duracion_minutos", default = "default_duration")]
    pub duration_min: u32,
    #[serde(rename = "servicios", default)]
    pub services: Vec<Service>,
}

fn default_duration() -> u32 {
    60
}

/// Service declared inline while creating a sport.
#[derive(Debug, Serialize, Clone)]
pub struct NewSportService {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio_adicional")]
    pub price: Price,
}

#[derive(Debug, Serialize, Clone)]
pub struct NewSport {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "duracion_minutos")]
    pub duration_min: u32,
    #[serde(rename = "servicios", skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<NewSportService>,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct SportPatch {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "duracion_minutos", skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<u32>,
    /// Services appended to the sport; existing ones are kept.
    #[serde(rename = "servicios", skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<NewSportService>,
}
