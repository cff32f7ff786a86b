use reqwest::header::AUTHORIZATION;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use super::signing::{authorization_header, OAuthRequest};
use crate::auth::credentials::Credentials;
use crate::auth::token::TokenPair;
use crate::config::ServiceOptions;
use crate::error::AppError;
use crate::models::device::Device;
use crate::models::sensor::Sensor;

const PATH_PREFIX: &str = "/json";

pub(crate) fn build_http_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("tdlive/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(30))
        .build()?)
}

/// Issue an OAuth-signed GET and return the body of a successful response.
///
/// A non-success status is reported as [`AppError::Transport`] without
/// looking at the body.
pub(crate) async fn signed_get(
    client: &reqwest::Client,
    url: &str,
    consumer: &TokenPair,
    token: Option<&TokenPair>,
    extra: &[(&str, &str)],
) -> Result<String, AppError> {
    let url = Url::parse(url).map_err(|e| AppError::InvalidInput(format!("{}: {}", url, e)))?;
    let header = authorization_header(&OAuthRequest {
        method: "GET",
        url: &url,
        consumer,
        token,
        extra,
    });

    debug!("GET {}", url);

    let response = client
        .get(url)
        .header(AUTHORIZATION, header)
        .send()
        .await?;

    let status = response.status();
    debug!("Response status: {}", status);
    if !status.is_success() {
        return Err(AppError::Transport {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    let body = response.text().await?;
    debug!("Response body: {}", body);
    Ok(body)
}

/// `/json{function}` plus a `k=v&k=v` query. Values go on the wire as given.
pub fn build_path(function: &str, params: &[(&str, String)]) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut path = format!("{}{}", PATH_PREFIX, function);
    if !query.is_empty() {
        path.push('?');
        path.push_str(&query);
    }
    path
}

/// Turn a response body into JSON, failing on an `error` member.
pub fn parse_response(body: &str) -> Result<Value, AppError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AppError::Protocol(format!("response is not valid JSON: {}", e)))?;

    if let Some(error) = value.get("error") {
        let message = match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(AppError::Api { message });
    }

    Ok(value)
}

pub struct TelldusApi {
    client: reqwest::Client,
    options: ServiceOptions,
    consumer: TokenPair,
    token: TokenPair,
}

impl TelldusApi {
    pub fn new(credentials: &Credentials, options: ServiceOptions) -> Result<Self, AppError> {
        Ok(Self {
            client: build_http_client()?,
            options,
            consumer: credentials.consumer(),
            token: credentials.access_token(),
        })
    }

    /// Signed GET of a site-relative path (query included).
    pub async fn get_signed(&self, path: &str) -> Result<String, AppError> {
        signed_get(
            &self.client,
            &self.options.url(path),
            &self.consumer,
            Some(&self.token),
            &[],
        )
        .await
    }

    /// Call an API function such as `/devices/list` and return its JSON.
    pub async fn request(&self, function: &str, params: &[(&str, String)]) -> Result<Value, AppError> {
        let path = build_path(function, params);
        let body = self.get_signed(&path).await?;
        parse_response(&body)
    }

    pub async fn devices(&self) -> Result<Vec<Device<'_>>, AppError> {
        let response = self.request("/devices/list", &[]).await?;
        list_member(&response, "device")?
            .iter()
            .map(|payload| Device::from_payload(self, payload))
            .collect()
    }

    pub fn device(&self, id: i64) -> Device<'_> {
        Device::from_id(self, id)
    }

    pub async fn sensors(&self) -> Result<Vec<Sensor<'_>>, AppError> {
        let response = self.request("/sensors/list", &[]).await?;
        list_member(&response, "sensor")?
            .iter()
            .map(|payload| Sensor::from_payload(self, payload))
            .collect()
    }

    pub fn sensor(&self, id: i64) -> Sensor<'_> {
        Sensor::from_id(self, id)
    }
}

fn list_member<'v>(response: &'v Value, key: &str) -> Result<&'v Vec<Value>, AppError> {
    response
        .get(key)
        .and_then(|v| v.as_array())
        .ok_or_else(|| AppError::Protocol(format!("list response has no '{}' array", key)))
}
