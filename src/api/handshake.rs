use tracing::{debug, warn};

use super::client::{build_http_client, signed_get};
use super::response::TokenResponse;
use crate::auth::token::TokenPair;
use crate::config::ServiceOptions;
use crate::error::AppError;

/// The three-legged OAuth 1.0a dance that turns a consumer identity into an
/// access token.
pub struct OAuthHandshake {
    client: reqwest::Client,
    options: ServiceOptions,
    consumer: TokenPair,
}

impl OAuthHandshake {
    pub fn new(consumer: TokenPair, options: ServiceOptions) -> Result<Self, AppError> {
        Ok(Self {
            client: build_http_client()?,
            options,
            consumer,
        })
    }

    /// Step 1: obtain an unauthorized request token (out-of-band callback).
    pub async fn request_token(&self) -> Result<TokenPair, AppError> {
        let url = self.options.url(&self.options.request_token_path);
        let body = signed_get(
            &self.client,
            &url,
            &self.consumer,
            None,
            &[("oauth_callback", "oob")],
        )
        .await?;
        let response = TokenResponse::from_form(&body)?;
        if response.callback_confirmed != Some(true) {
            warn!("Request token response did not confirm the oob callback");
        }
        debug!("Obtained request token {}", response.token.key);
        Ok(response.token)
    }

    /// Step 2: where the user approves the request token.
    pub fn authorize_url(&self, request_token: &TokenPair) -> String {
        format!(
            "{}?oauth_token={}",
            self.options.url(&self.options.authorize_path),
            urlencoding::encode(&request_token.key)
        )
    }

    /// Step 3: exchange the approved request token for an access token.
    pub async fn access_token(
        &self,
        request_token: &TokenPair,
        verifier: Option<&str>,
    ) -> Result<TokenPair, AppError> {
        let url = self.options.url(&self.options.access_token_path);
        let extra: Vec<(&str, &str)> = verifier
            .filter(|v| !v.is_empty())
            .map(|v| vec![("oauth_verifier", v)])
            .unwrap_or_default();
        let body = signed_get(&self.client, &url, &self.consumer, Some(request_token), &extra).await?;
        let response = TokenResponse::from_form(&body)?;
        debug!("Obtained access token {}", response.token.key);
        Ok(response.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url() {
        let handshake = OAuthHandshake::new(
            TokenPair::new("consumer", "secret"),
            ServiceOptions::default(),
        )
        .unwrap();
        let url = handshake.authorize_url(&TokenPair::new("req token", "s"));
        assert_eq!(url, "http://api.telldus.com/oauth/authorize?oauth_token=req%20token");
    }
}
