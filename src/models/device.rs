use serde_json::Value;
use tracing::{debug, warn};

use crate::api::client::TelldusApi;
use crate::error::AppError;
use crate::models::device_info::DeviceInfo;
use crate::models::level::wire_level;

const STATUS_SUCCESS: &str = "success";

/// What the API made of a dim request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimOutcome {
    Applied { level: i64, raw: u8 },
    Rejected { raw: u8, status: Option<String> },
}

impl DimOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, DimOutcome::Applied { .. })
    }
}

/// A dimmable device. Info is taken from the payload it was built from, or
/// fetched from `/device/info` the first time it is needed.
pub struct Device<'a> {
    client: &'a TelldusApi,
    id: i64,
    info: Option<DeviceInfo>,
    level: Option<i64>,
}

impl<'a> Device<'a> {
    pub fn from_id(client: &'a TelldusApi, id: i64) -> Self {
        Self {
            client,
            id,
            info: None,
            level: None,
        }
    }

    pub fn from_payload(client: &'a TelldusApi, payload: &Value) -> Result<Self, AppError> {
        let info = DeviceInfo::from_json(payload).ok_or_else(|| {
            AppError::Construction(format!(
                "Device expects either an integer id or an object with an id, got: {}",
                payload
            ))
        })?;
        Ok(Self {
            client,
            id: info.id,
            info: Some(info),
            level: None,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    async fn info(&mut self) -> Result<&DeviceInfo, AppError> {
        let info = match self.info.take() {
            Some(info) => info,
            None => {
                debug!(device = self.id, "Fetching device info");
                let response = self
                    .client
                    .request("/device/info", &[("id", self.id.to_string())])
                    .await?;
                DeviceInfo::from_json(&response).ok_or_else(|| {
                    AppError::Protocol(format!("device info for {} has no id", self.id))
                })?
            }
        };
        let info: &DeviceInfo = self.info.insert(info);
        Ok(info)
    }

    pub async fn name(&mut self) -> Result<String, AppError> {
        Ok(self.info().await?.name().to_string())
    }

    /// Current dim level in percent.
    pub async fn level(&mut self) -> Result<i64, AppError> {
        if let Some(level) = self.level {
            return Ok(level);
        }
        let level = self.info().await?.level();
        self.level = Some(level);
        Ok(level)
    }

    /// Ask the API to dim to `value` percent.
    ///
    /// On success the cached level becomes `value` exactly as requested, not
    /// the percentage the wire value maps back to. Any status other than
    /// `success` leaves the cache alone and is reported through the outcome
    /// and a warning, never as an error.
    pub async fn set_level(&mut self, value: i64) -> Result<DimOutcome, AppError> {
        let raw = wire_level(value);
        let response = self
            .client
            .request(
                "/device/dim",
                &[("id", self.id.to_string()), ("level", raw.to_string())],
            )
            .await?;

        let status = response.get("status").and_then(|v| v.as_str());
        if status == Some(STATUS_SUCCESS) {
            self.level = Some(value);
            debug!(device = self.id, level = value, raw, "Level changed");
            Ok(DimOutcome::Applied { level: value, raw })
        } else {
            warn!(device = self.id, status = ?status, "Level change did not succeed");
            Ok(DimOutcome::Rejected {
                raw,
                status: status.map(String::from),
            })
        }
    }
}
