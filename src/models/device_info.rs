use serde::Serialize;

use super::json::{int_field, str_field};
use super::level::level_from_statevalue;

/// The fields of a `/devices/list` entry or a `/device/info` response.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceInfo {
    pub id: i64,
    pub name: Option<String>,
    pub statevalue: Option<i64>,
    pub state: Option<i64>,
    pub methods: Option<i64>,
}

impl DeviceInfo {
    /// None when the payload is not an object or has no usable `id`.
    pub fn from_json(data: &serde_json::Value) -> Option<Self> {
        if !data.is_object() {
            return None;
        }
        Some(Self {
            id: int_field(data, "id")?,
            name: str_field(data, "name"),
            statevalue: int_field(data, "statevalue"),
            state: int_field(data, "state"),
            methods: int_field(data, "methods"),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// A missing state value counts as off.
    pub fn level(&self) -> i64 {
        level_from_statevalue(self.statevalue.unwrap_or(0))
    }
}
