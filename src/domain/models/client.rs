use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Client {
    #[serde(rename = "id_cliente")]
    pub id: i64,
    pub dni: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "activo", default = "active_by_default")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

impl Client {
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.first_name, self.last_name, self.dni)
    }
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct ClientPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dni: Option<String>,
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
