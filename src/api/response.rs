use url::form_urlencoded;

use crate::auth::token::TokenPair;
use crate::error::AppError;

/// Form-encoded body returned by the request-token and access-token endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: TokenPair,
    pub callback_confirmed: Option<bool>,
}

impl TokenResponse {
    pub fn from_form(body: &str) -> Result<Self, AppError> {
        let mut key = None;
        let mut secret = None;
        let mut callback_confirmed = None;

        for (k, v) in form_urlencoded::parse(body.trim().as_bytes()) {
            match k.as_ref() {
                "oauth_token" => key = Some(v.into_owned()),
                "oauth_token_secret" => secret = Some(v.into_owned()),
                "oauth_callback_confirmed" => callback_confirmed = Some(v == "true"),
                _ => {}
            }
        }

        match (key, secret) {
            (Some(key), Some(secret)) if !key.is_empty() => Ok(Self {
                token: TokenPair::new(key, secret),
                callback_confirmed,
            }),
            _ => Err(AppError::OAuth(format!(
                "token response lacks oauth_token/oauth_token_secret: {}",
                body.trim()
            ))),
        }
    }
}
