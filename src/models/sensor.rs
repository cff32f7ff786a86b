use chrono::{DateTime, Local, TimeZone};
use serde_json::Value;
use tracing::debug;

use crate::api::client::TelldusApi;
use crate::error::AppError;
use crate::models::sensor_info::{readings_from_json, Reading, SensorInfo};

/// A sensor and its latest readings. Info is memoized after the first
/// `/sensor/info` round trip.
pub struct Sensor<'a> {
    client: &'a TelldusApi,
    id: i64,
    info: Option<SensorInfo>,
}

impl<'a> Sensor<'a> {
    pub fn from_id(client: &'a TelldusApi, id: i64) -> Self {
        Self {
            client,
            id,
            info: None,
        }
    }

    pub fn from_payload(client: &'a TelldusApi, payload: &Value) -> Result<Self, AppError> {
        let info = SensorInfo::from_json(payload).ok_or_else(|| {
            AppError::Construction(format!(
                "Sensor expects either an integer id or an object with an id, got: {}",
                payload
            ))
        })?;
        Ok(Self {
            client,
            id: info.id,
            info: Some(info),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    async fn fetch_info(&self) -> Result<Value, AppError> {
        debug!(sensor = self.id, "Fetching sensor info");
        self.client
            .request("/sensor/info", &[("id", self.id.to_string())])
            .await
    }

    async fn info(&mut self) -> Result<&mut SensorInfo, AppError> {
        let info = match self.info.take() {
            Some(info) => info,
            None => {
                let response = self.fetch_info().await?;
                SensorInfo::from_json(&response).ok_or_else(|| {
                    AppError::Protocol(format!("sensor info for {} has no id", self.id))
                })?
            }
        };
        Ok(self.info.insert(info))
    }

    pub async fn name(&mut self) -> Result<String, AppError> {
        Ok(self.info().await?.name().to_string())
    }

    /// `lastUpdated` in local time, if the API reported one.
    pub async fn last_update(&mut self) -> Result<Option<DateTime<Local>>, AppError> {
        let id = self.id;
        match self.info().await?.last_updated {
            Some(ts) => Local
                .timestamp_opt(ts, 0)
                .single()
                .map(Some)
                .ok_or_else(|| {
                    AppError::Protocol(format!("sensor {} has invalid lastUpdated {}", id, ts))
                }),
            None => Ok(None),
        }
    }

    /// Readings in API order. Info built from a list entry has none, which
    /// costs a separate `/sensor/info` request; the result is cached.
    pub async fn data(&mut self) -> Result<&[Reading], AppError> {
        if self.info().await?.data.is_none() {
            let response = self.fetch_info().await?;
            let readings = readings_from_json(&response).ok_or_else(|| {
                AppError::Protocol(format!("sensor info for {} has no data", self.id))
            })?;
            self.info().await?.data = Some(readings);
        }
        Ok(self.info().await?.data.as_deref().unwrap_or_default())
    }

    /// `"<id> <name>\n"` followed by `"  <reading>: <value>\n"` per reading.
    pub async fn render(&mut self) -> Result<String, AppError> {
        let id = self.id;
        let mut out = format!("{} {}\n", id, self.name().await?);
        for reading in self.data().await? {
            out.push_str(&format!("  {}: {}\n", reading.name, reading.value));
        }
        Ok(out)
    }
}
