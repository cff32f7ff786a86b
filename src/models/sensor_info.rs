use serde::Serialize;

use super::json::{display_value, int_field, str_field};

/// One named measurement from a sensor's `data` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reading {
    pub name: String,
    pub value: String,
    pub scale: Option<String>,
}

impl Reading {
    pub fn from_json(data: &serde_json::Value) -> Self {
        Self {
            name: str_field(data, "name").unwrap_or_default(),
            value: data.get("value").map(display_value).unwrap_or_default(),
            scale: str_field(data, "scale"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SensorInfo {
    pub id: i64,
    pub name: Option<String>,
    pub last_updated: Option<i64>,
    pub protocol: Option<String>,
    pub model: Option<String>,
    /// Absent in list payloads; `/sensor/info` carries it.
    pub data: Option<Vec<Reading>>,
}

impl SensorInfo {
    pub fn from_json(data: &serde_json::Value) -> Option<Self> {
        if !data.is_object() {
            return None;
        }
        Some(Self {
            id: int_field(data, "id")?,
            name: str_field(data, "name"),
            last_updated: int_field(data, "lastUpdated"),
            protocol: str_field(data, "protocol"),
            model: str_field(data, "model"),
            data: readings_from_json(data),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// The `data` array of a sensor payload, if it has one.
pub fn readings_from_json(data: &serde_json::Value) -> Option<Vec<Reading>> {
    data.get("data")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().map(Reading::from_json).collect())
}
