use serde_json::json;
use tabled::Tabled;

use crate::api::client::TelldusApi;
use crate::cli::output::{print_json, print_table};
use crate::config::{OutputMode, RuntimeConfig};
use crate::error::AppError;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Tabled)]
struct SensorRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "LAST UPDATE")]
    last_update: String,
}

#[derive(Tabled)]
struct ReadingRow {
    #[tabled(rename = "READING")]
    name: String,
    #[tabled(rename = "VALUE")]
    value: String,
}

pub async fn handle_list(api: &TelldusApi, config: &RuntimeConfig) -> Result<(), AppError> {
    let mut sensors = api.sensors().await?;

    match config.output_mode {
        OutputMode::Text => {
            for sensor in sensors.iter_mut() {
                println!("{} {}", sensor.id(), sensor.name().await?);
            }
        }
        OutputMode::Table => {
            let mut rows = Vec::with_capacity(sensors.len());
            for sensor in sensors.iter_mut() {
                rows.push(SensorRow {
                    id: sensor.id(),
                    name: sensor.name().await?,
                    last_update: sensor
                        .last_update()
                        .await?
                        .map(|t| t.format(TIME_FORMAT).to_string())
                        .unwrap_or_else(|| "-".into()),
                });
            }
            print_table(&rows);
        }
        OutputMode::Json => {
            let mut json_sensors = Vec::with_capacity(sensors.len());
            for sensor in sensors.iter_mut() {
                json_sensors.push(json!({
                    "id": sensor.id(),
                    "name": sensor.name().await?,
                    "last_updated": sensor.last_update().await?.map(|t| t.to_rfc3339()),
                }));
            }
            print_json(&json!(json_sensors));
        }
    }

    Ok(())
}

pub async fn handle_show(
    api: &TelldusApi,
    sensor_id: i64,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let mut sensor = api.sensor(sensor_id);

    match config.output_mode {
        OutputMode::Text => print!("{}", sensor.render().await?),
        OutputMode::Table => {
            println!("{} {}", sensor.id(), sensor.name().await?);
            let rows: Vec<ReadingRow> = sensor
                .data()
                .await?
                .iter()
                .map(|r| ReadingRow {
                    name: r.name.clone(),
                    value: r.value.clone(),
                })
                .collect();
            print_table(&rows);
        }
        OutputMode::Json => {
            let name = sensor.name().await?;
            let last_updated = sensor.last_update().await?.map(|t| t.to_rfc3339());
            let data = sensor.data().await?;
            print_json(&json!({
                "id": sensor_id,
                "name": name,
                "last_updated": last_updated,
                "data": data,
            }));
        }
    }

    Ok(())
}
