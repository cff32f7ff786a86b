#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
    Table,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub output_mode: OutputMode,
}

pub const DEFAULT_SITE: &str = "http://api.telldus.com";

/// Where the Telldus Live API lives and where its OAuth endpoints are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOptions {
    pub site: String,
    pub request_token_path: String,
    pub authorize_path: String,
    pub access_token_path: String,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            site: DEFAULT_SITE.into(),
            request_token_path: "/oauth/requestToken".into(),
            authorize_path: "/oauth/authorize".into(),
            access_token_path: "/oauth/accessToken".into(),
        }
    }
}

impl ServiceOptions {
    pub fn with_site(site: Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(site) = site {
            options.site = site.trim_end_matches('/').to_string();
        }
        options
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.site, path)
    }
}
