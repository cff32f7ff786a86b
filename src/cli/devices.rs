use serde_json::json;
use tabled::Tabled;

use crate::api::client::TelldusApi;
use crate::cli::output::{print_json, print_table};
use crate::config::{OutputMode, RuntimeConfig};
use crate::error::AppError;
use crate::models::device::DimOutcome;
use crate::models::level::LevelChange;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "LEVEL")]
    level: String,
}

pub async fn handle_list(api: &TelldusApi, config: &RuntimeConfig) -> Result<(), AppError> {
    let mut devices = api.devices().await?;

    match config.output_mode {
        OutputMode::Text => {
            for device in devices.iter_mut() {
                println!("{} {}", device.id(), device.name().await?);
            }
        }
        OutputMode::Table => {
            let mut rows = Vec::with_capacity(devices.len());
            for device in devices.iter_mut() {
                rows.push(DeviceRow {
                    id: device.id(),
                    name: device.name().await?,
                    level: format!("{}%", device.level().await?),
                });
            }
            print_table(&rows);
        }
        OutputMode::Json => {
            let mut json_devices = Vec::with_capacity(devices.len());
            for device in devices.iter_mut() {
                json_devices.push(json!({
                    "id": device.id(),
                    "name": device.name().await?,
                    "level": device.level().await?,
                }));
            }
            print_json(&json!(json_devices));
        }
    }

    Ok(())
}

pub async fn handle_dim(
    api: &TelldusApi,
    device_id: i64,
    change: LevelChange,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let mut device = api.device(device_id);

    // Relative changes read the current level first: two round trips.
    let target = match change {
        LevelChange::Set(level) => level,
        relative => relative.apply(device.level().await?),
    };

    let outcome = device.set_level(target).await?;

    if config.output_mode == OutputMode::Json {
        let (raw, status) = match &outcome {
            DimOutcome::Applied { raw, .. } => (*raw, json!("success")),
            DimOutcome::Rejected { raw, status } => (*raw, json!(status)),
        };
        print_json(&json!({
            "device": device_id,
            "level": target,
            "raw_level": raw,
            "succeeded": outcome.succeeded(),
            "status": status,
        }));
    } else if !outcome.succeeded() {
        println!("Level change on \"{}\" did not succeed", device_id);
    }

    Ok(())
}
