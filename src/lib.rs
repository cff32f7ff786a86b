pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod resolve;

use cli::output::print_error;
use config::{OutputMode, RuntimeConfig, ServiceOptions};
use error::AppError;

pub async fn run(cli_args: cli::Cli) -> i32 {
    let config = RuntimeConfig {
        output_mode: if cli_args.json {
            OutputMode::Json
        } else if cli_args.table {
            OutputMode::Table
        } else {
            OutputMode::Text
        },
    };

    let result = dispatch(cli_args, &config).await;

    match result {
        Ok(()) => 0,
        Err(err) => {
            print_error(&err, config.output_mode);
            err.exit_code()
        }
    }
}

async fn dispatch(cli_args: cli::Cli, config: &RuntimeConfig) -> Result<(), AppError> {
    let cli::Cli {
        command,
        auth_file,
        site,
        ..
    } = cli_args;

    let connect = || resolve::connect(auth_file.as_deref(), site.clone());

    match command {
        cli::Commands::Devices => {
            let api = connect()?;
            cli::devices::handle_list(&api, config).await
        }
        cli::Commands::Dim { device_id, amount } => {
            let api = connect()?;
            cli::devices::handle_dim(&api, device_id, amount, config).await
        }
        cli::Commands::Sensors => {
            let api = connect()?;
            cli::sensors::handle_list(&api, config).await
        }
        cli::Commands::Sensor { sensor_id } => {
            let api = connect()?;
            cli::sensors::handle_show(&api, sensor_id, config).await
        }
        cli::Commands::Authorize {
            consumer_key,
            consumer_secret,
        } => {
            let auth_path = auth::credentials::resolve_auth_path(auth_file.as_deref())?;
            cli::auth::handle_authorize(
                consumer_key,
                consumer_secret,
                ServiceOptions::with_site(site.clone()),
                &auth_path,
                config,
            )
            .await
        }
    }
}
