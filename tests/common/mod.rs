#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tdlive::api::client::TelldusApi;
use tdlive::auth::credentials::Credentials;
use tdlive::config::ServiceOptions;
use wiremock::MockServer;

pub fn credentials() -> Credentials {
    Credentials {
        consumer_key: "test-consumer".into(),
        consumer_secret: "consumer-secret".into(),
        token: "test-token".into(),
        token_secret: "token-secret".into(),
    }
}

pub fn api_for(server: &MockServer) -> TelldusApi {
    TelldusApi::new(&credentials(), ServiceOptions::with_site(Some(server.uri()))).unwrap()
}

pub fn write_auth_file(dir: &Path) -> PathBuf {
    let path = dir.join("auth.yml");
    credentials().save(&path).unwrap();
    path
}
