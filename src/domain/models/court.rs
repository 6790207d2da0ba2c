use serde::{Deserialize, Serialize};

use crate::domain::models::price::Price;

/// Sport relation as the backend embeds it inside a court.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CourtSport {
    #[serde(rename = "id_deporte")]
    pub id: i64,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "duracion_minutos", default)]
    pub duration_min: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Court {
    #[serde(rename = "id_cancha")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipo_deporte", default)]
    pub sport_label: Option<String>,
    #[serde(rename = "superficie", default)]
    pub surface: Option<String>,
    #[serde(rename = "precio_hora", default)]
    pub hourly_price: Price,
    #[serde(rename = "precio_iluminacion", default)]
    pub lighting_price: Price,
    #[serde(rename = "iluminacion", default)]
    pub has_lighting: Option<bool>,
    #[serde(rename = "activa", default = "active_by_default")]
    pub active: bool,
    #[serde(rename = "id_deporte", default, skip_serializing_if = "Option::is_none")]
    pub sport_id: Option<i64>,
    #[serde(rename = "deporte", default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<CourtSport>,
}

fn active_by_default() -> bool {
    true
}

impl Court {
    /// Sport id when the backend states the relation explicitly.
    pub fn direct_sport_id(&self) -> Option<i64> {
        self.sport.as_ref().map(|s| s.id).or(self.sport_id)
    }
}

/// Body for create and update. Unset fields are left out so an update only
/// touches what was given.
#[derive(Debug, Serialize, Clone, Default)]
pub struct CourtPayload {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "tipo_deporte", skip_serializing_if = "Option::is_none")]
    pub sport_label: Option<String>,
    #[serde(rename = "superficie", skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    #[serde(rename = "precio_hora", skip_serializing_if = "Option::is_none")]
    pub hourly_price: Option<Price>,
    #[serde(rename = "precio_iluminacion", skip_serializing_if = "Option::is_none")]
    pub lighting_price: Option<Price>,
    #[serde(rename = "iluminacion", skip_serializing_if = "Option::is_none")]
    pub has_lighting: Option<bool>,
    #[serde(rename = "activa", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(rename = "id_deporte", skip_serializing_if = "Option::is_none")]
    pub sport_id: Option<i64>,
}
