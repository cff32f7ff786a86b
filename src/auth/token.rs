use serde::{Deserialize, Serialize};

/// A token/secret pair: either the application's consumer identity or a
/// request/access token issued during the OAuth handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub key: String,
    pub secret: String,
}

impl TokenPair {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}
