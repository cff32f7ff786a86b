use std::path::Path;

use dialoguer::{Input, Password};
use serde_json::json;

use crate::api::handshake::OAuthHandshake;
use crate::auth::credentials::{consumer_from_env, Credentials};
use crate::auth::token::TokenPair;
use crate::cli::output::print_json;
use crate::config::{OutputMode, RuntimeConfig, ServiceOptions};
use crate::error::AppError;

fn prompt_consumer() -> Result<TokenPair, AppError> {
    let key: String = Input::new()
        .with_prompt("Consumer key")
        .interact_text()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    let secret: String = Password::new()
        .with_prompt("Consumer secret")
        .interact()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    Ok(TokenPair::new(key, secret))
}

pub async fn handle_authorize(
    consumer_key: Option<String>,
    consumer_secret: Option<String>,
    options: ServiceOptions,
    auth_path: &Path,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let consumer = match (consumer_key, consumer_secret) {
        (Some(key), Some(secret)) => TokenPair::new(key, secret),
        _ => match consumer_from_env() {
            Some(consumer) => consumer,
            None => prompt_consumer()?,
        },
    };

    let handshake = OAuthHandshake::new(consumer.clone(), options)?;
    let request_token = handshake.request_token().await?;

    eprintln!("Open this URL in a browser and grant access:");
    println!("{}", handshake.authorize_url(&request_token));

    let verifier: String = Input::new()
        .with_prompt("Verification code (press Enter if none was shown)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    let access = handshake
        .access_token(&request_token, Some(verifier.trim()))
        .await?;

    let credentials = Credentials {
        consumer_key: consumer.key,
        consumer_secret: consumer.secret,
        token: access.key,
        token_secret: access.secret,
    };
    credentials.save(auth_path)?;

    if config.output_mode == OutputMode::Json {
        print_json(&json!({
            "status": "authorized",
            "auth_file": auth_path.display().to_string(),
        }));
    } else {
        println!("Wrote credentials to {}", auth_path.display());
    }

    Ok(())
}
